//! Raw scrape configuration as written by the user.
//!
//! Every optional knob stays optional here. Defaulting and validation happen in the
//! resolution engine, which turns a [`ScrapeConfig`] into a [`crate::JobsConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The only `apiVersion` value the resolver accepts.
pub const API_VERSION: &str = "v1alpha1";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapeConfig {
    pub api_version: Option<String>,
    #[serde(rename = "sts-region")]
    pub sts_region: Option<String>,
    pub discovery: Discovery,
    #[serde(rename = "static")]
    pub static_jobs: Vec<StaticJobSpec>,
    #[serde(rename = "customNamespace")]
    pub custom_namespace_jobs: Vec<CustomNamespaceJobSpec>,
}

impl ScrapeConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn has_jobs(&self) -> bool {
        !self.discovery.jobs.is_empty()
            || !self.static_jobs.is_empty()
            || !self.custom_namespace_jobs.is_empty()
    }

    /// Gives every job without roles a single empty role, meaning "use the ambient
    /// credentials of the process".
    pub fn default_empty_roles(&mut self) {
        for job in &mut self.discovery.jobs {
            default_roles(&mut job.roles);
        }
        for job in &mut self.static_jobs {
            default_roles(&mut job.roles);
        }
        for job in &mut self.custom_namespace_jobs {
            default_roles(&mut job.roles);
        }
    }
}

fn default_roles(roles: &mut Vec<Role>) {
    if roles.is_empty() {
        roles.push(Role::default());
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Discovery {
    /// Keyed by canonical service namespace.
    pub exported_tags_on_metrics: BTreeMap<String, Vec<String>>,
    pub jobs: Vec<DiscoveryJobSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An assumable identity. Both fields empty means ambient credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Role {
    pub role_arn: String,
    pub external_id: String,
}

/// Fallback values a job offers to each of its metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobLevelDefaults {
    pub statistics: Option<Vec<String>>,
    pub period: Option<i64>,
    pub length: Option<i64>,
    pub delay: Option<i64>,
    pub nil_to_zero: Option<bool>,
    pub add_cloudwatch_timestamp: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricSpec {
    pub name: String,
    pub statistics: Option<Vec<String>>,
    pub period: Option<i64>,
    pub length: Option<i64>,
    /// Accepted for old configurations, never applied.
    pub delay: Option<i64>,
    pub nil_to_zero: Option<bool>,
    pub add_cloudwatch_timestamp: Option<bool>,
}

impl MetricSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryJobSpec {
    pub regions: Vec<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub roles: Vec<Role>,
    pub search_tags: Vec<Tag>,
    pub custom_tags: Vec<Tag>,
    pub dimension_name_requirements: Vec<String>,
    pub metrics: Vec<MetricSpec>,
    /// Deprecated.
    pub rounding_period: Option<i64>,
    pub recently_active_only: bool,
    pub include_context_on_info_metrics: bool,
    pub include_linked_accounts: Vec<String>,
    pub statistics: Option<Vec<String>>,
    pub period: Option<i64>,
    pub length: Option<i64>,
    pub delay: Option<i64>,
    pub nil_to_zero: Option<bool>,
    pub add_cloudwatch_timestamp: Option<bool>,
}

impl DiscoveryJobSpec {
    pub fn defaults(&self) -> JobLevelDefaults {
        JobLevelDefaults {
            statistics: self.statistics.clone(),
            period: self.period,
            length: self.length,
            delay: self.delay,
            nil_to_zero: self.nil_to_zero,
            add_cloudwatch_timestamp: self.add_cloudwatch_timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticJobSpec {
    pub name: String,
    pub regions: Vec<String>,
    pub roles: Vec<Role>,
    pub namespace: String,
    pub custom_tags: Vec<Tag>,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<MetricSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomNamespaceJobSpec {
    pub regions: Vec<String>,
    pub name: String,
    pub namespace: String,
    pub recently_active_only: bool,
    pub roles: Vec<Role>,
    pub metrics: Vec<MetricSpec>,
    pub custom_tags: Vec<Tag>,
    pub dimension_name_requirements: Vec<String>,
    /// Deprecated.
    pub rounding_period: Option<i64>,
    pub include_linked_accounts: Vec<String>,
    pub statistics: Option<Vec<String>>,
    pub period: Option<i64>,
    pub length: Option<i64>,
    pub delay: Option<i64>,
    pub nil_to_zero: Option<bool>,
    pub add_cloudwatch_timestamp: Option<bool>,
}

impl CustomNamespaceJobSpec {
    pub fn defaults(&self) -> JobLevelDefaults {
        JobLevelDefaults {
            statistics: self.statistics.clone(),
            period: self.period,
            length: self.length,
            delay: self.delay,
            nil_to_zero: self.nil_to_zero,
            add_cloudwatch_timestamp: self.add_cloudwatch_timestamp,
        }
    }
}
