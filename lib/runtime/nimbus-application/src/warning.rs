use std::fmt;

use crate::error::{JobRef, MetricRef};

/// A non-fatal finding produced while loading a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Metric-level delay has never been applied; only the job-level delay is.
    MetricDelayIgnored { job: JobRef, metric: MetricRef },
    RoundingPeriodDeprecated { job: JobRef },
    MissingApiVersion,
    UnknownField { path: String },
    Syntax { message: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MetricDelayIgnored { job, metric } => write!(
                f,
                "{metric} in {job}: metric delay is ignored, remove it to avoid a future behavior change"
            ),
            ConfigWarning::RoundingPeriodDeprecated { job } => write!(
                f,
                "{job}: setting a rounding period is deprecated, it will always follow the metric period"
            ),
            ConfigWarning::MissingApiVersion => f.write_str("missing apiVersion"),
            ConfigWarning::UnknownField { path } => write!(f, "unknown field {path}"),
            ConfigWarning::Syntax { message } => f.write_str(message),
        }
    }
}
