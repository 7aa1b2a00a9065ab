//! Configuration for the core operations
//!
//! Every knob is an explicit option struct passed into the operation that
//! uses it; there is no process-wide default state.

/// How sub-tables are combined during a cast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinMode {
    /// Keep the union of fixed-column tuples, filling gaps with null
    #[default]
    Outer,
    /// Keep only fixed-column tuples present in every sub-table
    Inner,
}

impl std::str::FromStr for JoinMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outer" => Ok(JoinMode::Outer),
            "inner" => Ok(JoinMode::Inner),
            _ => Err(format!("Unknown join mode: {}", s)),
        }
    }
}

/// What to do when two rows map to the same output cell of a cast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with `CastError::DuplicateKey`
    #[default]
    Reject,
    /// Keep the first occurrence in input row order
    FirstWins,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "first" | "first-wins" => Ok(DuplicatePolicy::FirstWins),
            _ => Err(format!("Unknown duplicate policy: {}", s)),
        }
    }
}

/// Options for the long-to-wide cast
#[derive(Debug, Clone, Copy, Default)]
pub struct CastOptions {
    pub join: JoinMode,
    pub duplicates: DuplicatePolicy,
}

impl CastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the join mode
    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }

    /// Set the duplicate-key policy
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// Whether two null cells compare equal during an equivalence check.
///
/// `Distinct` reproduces the behavior of comparing cells with a strictly
/// reflexive operator, under which null never equals null and two tables
/// with nulls in matching positions are judged non-equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NullEquality {
    #[default]
    Equal,
    Distinct,
}

/// Options for the equivalence check
#[derive(Debug, Clone, Copy, Default)]
pub struct EquivOptions {
    pub null_equality: NullEquality,
}

impl EquivOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the null-equality policy
    pub fn with_null_equality(mut self, null_equality: NullEquality) -> Self {
        self.null_equality = null_equality;
        self
    }
}

/// Output format for rendering a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
