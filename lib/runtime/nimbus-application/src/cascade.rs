//! Metric < job < global defaulting.

use nimbus_domain::{DEFAULT_LENGTH_SECONDS, DEFAULT_PERIOD_SECONDS, JobLevelDefaults, MetricSpec};

/// Returns the first level that is set, most specific first.
pub fn first_set<T>(levels: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    levels.into_iter().flatten().next()
}

/// Resolves metric fields against the defaults of the owning job, if it offers any.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cascade<'a> {
    job: Option<&'a JobLevelDefaults>,
}

impl<'a> Cascade<'a> {
    pub fn with_job(job: &'a JobLevelDefaults) -> Self {
        Self { job: Some(job) }
    }

    /// Static jobs have no job level.
    pub fn metric_only() -> Self {
        Self { job: None }
    }

    /// An empty list counts as unset at every level.
    pub fn statistics(&self, metric: &MetricSpec) -> Option<Vec<String>> {
        first_set([
            non_empty(metric.statistics.as_ref()),
            self.job.and_then(|job| non_empty(job.statistics.as_ref())),
        ])
        .cloned()
    }

    pub fn period(&self, metric: &MetricSpec) -> i64 {
        first_set([metric.period, self.job.and_then(|job| job.period)])
            .unwrap_or(DEFAULT_PERIOD_SECONDS)
    }

    pub fn length(&self, metric: &MetricSpec) -> i64 {
        first_set([metric.length, self.job.and_then(|job| job.length)])
            .unwrap_or(DEFAULT_LENGTH_SECONDS)
    }

    /// Only the job-level delay is honored.
    pub fn delay(&self) -> i64 {
        self.job.and_then(|job| job.delay).unwrap_or(0)
    }

    pub fn nil_to_zero(&self, metric: &MetricSpec) -> bool {
        first_set([metric.nil_to_zero, self.job.and_then(|job| job.nil_to_zero)])
            .unwrap_or(false)
    }

    pub fn add_cloudwatch_timestamp(&self, metric: &MetricSpec) -> bool {
        first_set([
            metric.add_cloudwatch_timestamp,
            self.job.and_then(|job| job.add_cloudwatch_timestamp),
        ])
        .unwrap_or(false)
    }
}

fn non_empty(values: Option<&Vec<String>>) -> Option<&Vec<String>> {
    values.filter(|values| !values.is_empty())
}
