use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    Discovery,
    Static,
    CustomNamespace,
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobCategory::Discovery => "Discovery job",
            JobCategory::Static => "Static job",
            JobCategory::CustomNamespace => "CustomNamespace job",
        };
        f.write_str(label)
    }
}

/// Locates a job in the source document: category, position and, once known, its
/// type (discovery) or name (static, custom namespace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRef {
    pub category: JobCategory,
    pub index: usize,
    pub label: String,
}

impl JobRef {
    pub fn new(category: JobCategory, index: usize) -> Self {
        Self {
            category,
            index,
            label: String::new(),
        }
    }

    pub fn labelled(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{} [{}]", self.category, self.index)
        } else {
            write!(f, "{} [{}/{}]", self.category, self.label, self.index)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRef {
    pub index: usize,
    pub name: String,
}

impl MetricRef {
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for MetricRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metric [{}/{}]", self.name, self.index)
    }
}

/// Where a namespace alias was used in place of a canonical namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSite {
    Job(JobRef),
    ExportedTags,
}

impl fmt::Display for AliasSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasSite::Job(job) => write!(f, "{job}: invalid 'type' field"),
            AliasSite::ExportedTags => f.write_str("Discovery jobs: invalid key in 'exportedTagsOnMetrics'"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("at least one discovery, static or custom namespace job must be defined")]
    EmptyConfiguration,
    #[error("{job}: type should not be empty")]
    EmptyType { job: JobRef },
    #[error("{job}: name should not be empty")]
    EmptyJobName { job: JobRef },
    #[error("{job}: namespace should not be empty")]
    EmptyNamespace { job: JobRef },
    #[error("{site}, use namespace {namespace:?} rather than alias {alias:?}")]
    AliasNotAllowed {
        site: AliasSite,
        namespace: String,
        alias: String,
    },
    #[error("{job}: service is not in the known list: {service}")]
    UnknownServiceType { job: JobRef, service: String },
    #[error(
        "{job}: no roles configured; an empty role should be configured to use the current credentials"
    )]
    NoRoles { job: JobRef },
    #[error("Role [{role_index}] in {job}: roleArn should not be empty when externalId is set")]
    InvalidRole { job: JobRef, role_index: usize },
    #[error("{job}: regions should not be empty")]
    EmptyRegions { job: JobRef },
    #[error("{job}: metrics should not be empty")]
    EmptyMetrics { job: JobRef },
    #[error("{metric} in {job}: name should not be empty")]
    EmptyMetricName { job: JobRef, metric: MetricRef },
    #[error("{metric} in {job}: statistics should not be empty")]
    EmptyStatistics { job: JobRef, metric: MetricRef },
    #[error("{metric} in {job}: period value should be a positive integer, got {period}")]
    InvalidPeriod {
        job: JobRef,
        metric: MetricRef,
        period: i64,
    },
    #[error(
        "{metric} in {job}: length({length}) is smaller than period({period}), requested data may not be ready and will leave gaps"
    )]
    InsufficientLength {
        job: JobRef,
        metric: MetricRef,
        length: i64,
        period: i64,
    },
    #[error("{job}: search tag value for {key} has invalid regex value {pattern}: {source}")]
    InvalidSearchTagRegex {
        job: JobRef,
        key: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("{job}: dimension pattern {pattern} of {namespace} is invalid: {source}")]
    InvalidDimensionPattern {
        job: JobRef,
        namespace: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("Discovery jobs: 'exportedTagsOnMetrics' key is not a valid namespace: {namespace}")]
    UnknownExportedTagNamespace { namespace: String },
    #[error("Discovery jobs: 'exportedTagsOnMetrics' key {namespace:?} does not match any discovery job type")]
    UnmatchedExportedTagNamespace { namespace: String },
    #[error("unknown apiVersion value '{version}'")]
    UnsupportedVersion { version: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_refs_name_category_label_and_index() {
        let job = JobRef::new(JobCategory::Discovery, 3);
        assert_eq!(job.to_string(), "Discovery job [3]");
        assert_eq!(job.labelled("AWS/EC2").to_string(), "Discovery job [AWS/EC2/3]");
    }

    #[test]
    fn metric_errors_locate_job_and_metric() {
        let err = ConfigError::InsufficientLength {
            job: JobRef::new(JobCategory::Static, 1).labelled("vpn"),
            metric: MetricRef::new(0, "TunnelState"),
            length: 300,
            period: 600,
        };
        let message = err.to_string();
        assert!(message.starts_with("Metric [TunnelState/0] in Static job [vpn/1]"));
        assert!(message.contains("length(300) is smaller than period(600)"));
    }

    #[test]
    fn alias_errors_name_the_canonical_namespace() {
        let err = ConfigError::AliasNotAllowed {
            site: AliasSite::Job(JobRef::new(JobCategory::Discovery, 0)),
            namespace: "AWS/EC2".to_string(),
            alias: "ec2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Discovery job [0]: invalid 'type' field, use namespace \"AWS/EC2\" rather than alias \"ec2\""
        );
    }
}
