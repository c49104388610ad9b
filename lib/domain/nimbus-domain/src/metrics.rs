use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{Dimension, Tag};

/// Label key to value. Ordered so that equality and hashing ignore insertion order.
pub type Labels = BTreeMap<String, String>;

/// The label keys observed for one metric family.
pub type LabelSet = BTreeSet<String>;

/// Where a sample or resource was scraped from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeContext {
    pub region: String,
    pub account_id: String,
    pub account_alias: Option<String>,
    pub custom_tags: Vec<Tag>,
}

/// One numeric observation for one resource, statistic and window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub namespace: String,
    pub metric_name: String,
    pub statistic: String,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    /// `None` when the provider returned no datapoint for the window.
    #[serde(default)]
    pub value: Option<f64>,
    pub timestamp: DateTime<Utc>,
    /// Resource ARN, exposed as the `name` label.
    pub resource_name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub context: ScrapeContext,
    #[serde(default)]
    pub nil_to_zero: bool,
    #[serde(default)]
    pub add_cloudwatch_timestamp: bool,
}

/// A single provider datapoint inside a query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggedResource {
    pub arn: String,
    pub namespace: String,
    pub region: String,
    pub tags: Vec<Tag>,
}

/// Resources discovered by one job in one region/account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceGroup {
    /// Attached only when the job asks for context on info records.
    pub context: Option<ScrapeContext>,
    pub resources: Vec<TaggedResource>,
}

/// One output row handed to the exposition layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedRecord {
    pub name: String,
    pub labels: Labels,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
    pub include_timestamp: bool,
}

impl EmittedRecord {
    pub fn new(name: impl Into<String>, labels: Labels, value: f64) -> Self {
        Self {
            name: name.into(),
            labels,
            value,
            timestamp: None,
            include_timestamp: false,
        }
    }

    pub fn label_keys(&self) -> LabelSet {
        self.labels.keys().cloned().collect()
    }
}
