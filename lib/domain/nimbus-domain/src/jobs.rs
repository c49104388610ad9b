//! Resolved execution model.
//!
//! Values here are fully defaulted and validated. They are produced once per
//! configuration load and shared read-only afterwards.

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::config::{Dimension, Role, Tag};

pub const DEFAULT_PERIOD_SECONDS: i64 = 300;
pub const DEFAULT_LENGTH_SECONDS: i64 = 300;

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobsConfig {
    pub sts_region: Option<String>,
    pub discovery_jobs: Vec<DiscoveryJob>,
    pub static_jobs: Vec<StaticJob>,
    pub custom_namespace_jobs: Vec<CustomNamespaceJob>,
}

impl JobsConfig {
    pub fn job_count(&self) -> usize {
        self.discovery_jobs.len() + self.static_jobs.len() + self.custom_namespace_jobs.len()
    }

    pub fn metric_count(&self) -> usize {
        self.discovery_jobs
            .iter()
            .map(|job| job.metrics.len())
            .chain(self.static_jobs.iter().map(|job| job.metrics.len()))
            .chain(self.custom_namespace_jobs.iter().map(|job| job.metrics.len()))
            .sum()
    }
}

/// A metric request with every field concretely populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricConfig {
    pub name: String,
    pub statistics: Vec<String>,
    pub period: i64,
    pub length: i64,
    pub delay: i64,
    pub nil_to_zero: bool,
    pub add_cloudwatch_timestamp: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchTag {
    pub key: String,
    #[serde(serialize_with = "serialize_regex")]
    pub value: Regex,
}

/// A resource ARN pattern whose named capture groups are dimension names.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionsRegexp {
    #[serde(serialize_with = "serialize_regex")]
    pub regexp: Regex,
    pub dimension_names: Vec<String>,
}

impl DimensionsRegexp {
    pub fn new(regexp: Regex) -> Self {
        let dimension_names = regexp
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();
        Self {
            regexp,
            dimension_names,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryJob {
    /// Canonical namespace, never an alias.
    pub namespace: String,
    pub regions: Vec<String>,
    pub roles: Vec<Role>,
    pub search_tags: Vec<SearchTag>,
    pub custom_tags: Vec<Tag>,
    pub dimension_name_requirements: Vec<String>,
    pub dimensions_regexps: Vec<DimensionsRegexp>,
    pub recently_active_only: bool,
    pub include_context_on_info_metrics: bool,
    pub include_linked_accounts: Vec<String>,
    pub rounding_period: Option<i64>,
    pub exported_tags_on_metrics: Vec<String>,
    pub metrics: Vec<MetricConfig>,
}

impl DiscoveryJob {
    /// Narrows a resource's tags to the keys this job exports on its metrics.
    ///
    /// Every exported key is present in the result; keys the resource lacks get an
    /// empty value.
    pub fn exported_tags(&self, resource_tags: &[Tag]) -> Vec<Tag> {
        self.exported_tags_on_metrics
            .iter()
            .map(|key| {
                let value = resource_tags
                    .iter()
                    .find(|tag| &tag.key == key)
                    .map(|tag| tag.value.clone())
                    .unwrap_or_default();
                Tag::new(key.clone(), value)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticJob {
    pub name: String,
    pub namespace: String,
    pub regions: Vec<String>,
    pub roles: Vec<Role>,
    pub custom_tags: Vec<Tag>,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<MetricConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomNamespaceJob {
    pub name: String,
    pub namespace: String,
    pub regions: Vec<String>,
    pub roles: Vec<Role>,
    pub custom_tags: Vec<Tag>,
    pub dimension_name_requirements: Vec<String>,
    pub recently_active_only: bool,
    pub include_linked_accounts: Vec<String>,
    pub rounding_period: Option<i64>,
    pub metrics: Vec<MetricConfig>,
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery_job(exported: &[&str]) -> DiscoveryJob {
        DiscoveryJob {
            namespace: "AWS/EC2".to_string(),
            regions: vec!["us-east-1".to_string()],
            roles: vec![Role::default()],
            search_tags: Vec::new(),
            custom_tags: Vec::new(),
            dimension_name_requirements: Vec::new(),
            dimensions_regexps: Vec::new(),
            recently_active_only: false,
            include_context_on_info_metrics: false,
            include_linked_accounts: Vec::new(),
            rounding_period: None,
            exported_tags_on_metrics: exported.iter().map(|key| key.to_string()).collect(),
            metrics: Vec::new(),
        }
    }

    #[test]
    fn dimension_names_come_from_named_groups() {
        let regexp =
            Regex::new(":service/(?P<ClusterName>[^/]+)/(?P<ServiceName>[^/]+)$").unwrap();
        let dimensions = DimensionsRegexp::new(regexp);
        assert_eq!(dimensions.dimension_names, vec!["ClusterName", "ServiceName"]);
    }

    #[test]
    fn exported_tags_fill_missing_keys() {
        let job = discovery_job(&["Name", "team"]);
        let tags = job.exported_tags(&[Tag::new("Name", "web-1"), Tag::new("cost", "x")]);
        assert_eq!(tags, vec![Tag::new("Name", "web-1"), Tag::new("team", "")]);
    }

    #[test]
    fn search_tags_serialize_as_patterns() {
        let mut job = discovery_job(&[]);
        job.search_tags.push(SearchTag {
            key: "env".to_string(),
            value: Regex::new("^prod$").unwrap(),
        });
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["search_tags"][0]["value"], "^prod$");
    }
}
