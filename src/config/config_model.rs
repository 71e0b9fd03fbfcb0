use chrono::NaiveDate;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub stage: Stage,
    pub generator: Generator,
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    pub seed: u64,
    pub users: usize,
    pub subscriptions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Overrides "today" for the report; `None` means the current UTC date.
    pub as_of: Option<NaiveDate>,
}
