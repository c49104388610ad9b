//! Sample and info record assembly.

use tracing::warn;

use nimbus_domain::{EmittedRecord, Labels, RawSample, ResourceGroup, ScrapeContext, Tag};

use super::naming::{NamespaceConvention, label_key};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordBuilder {
    pub convention: NamespaceConvention,
    /// Applied to dimension and tag keys, never to the fixed labels.
    pub labels_snake_case: bool,
}

impl RecordBuilder {
    pub fn new(labels_snake_case: bool) -> Self {
        Self {
            labels_snake_case,
            ..Self::default()
        }
    }

    pub fn with_convention(mut self, convention: NamespaceConvention) -> Self {
        self.convention = convention;
        self
    }

    /// One record per sample. A missing value becomes 0 under nil-to-zero and NaN
    /// otherwise; the record is always produced.
    pub fn sample_records(&self, samples: &[RawSample]) -> Vec<EmittedRecord> {
        samples.iter().map(|sample| self.sample_record(sample)).collect()
    }

    pub fn sample_record(&self, sample: &RawSample) -> EmittedRecord {
        let name = self.convention.metric_name(
            &sample.namespace,
            &sample.metric_name,
            &sample.statistic,
        );
        let value = match sample.value {
            Some(value) => value,
            None if sample.nil_to_zero => 0.0,
            None => f64::NAN,
        };

        let mut labels = Labels::new();
        labels.insert("name".to_string(), sample.resource_name.clone());
        self.insert_context(&mut labels, &sample.context);
        for dimension in &sample.dimensions {
            self.insert_prefixed(&mut labels, "dimension_", &dimension.name, &dimension.value);
        }
        self.insert_tags(&mut labels, "tag_", &sample.tags);

        EmittedRecord {
            name,
            labels,
            value,
            timestamp: Some(sample.timestamp),
            include_timestamp: sample.add_cloudwatch_timestamp,
        }
    }

    /// Appends one zero-valued record per discovered resource to `records`.
    pub fn info_records(
        &self,
        groups: &[ResourceGroup],
        mut records: Vec<EmittedRecord>,
    ) -> Vec<EmittedRecord> {
        for group in groups {
            for resource in &group.resources {
                let mut labels = Labels::new();
                labels.insert("name".to_string(), resource.arn.clone());
                self.insert_tags(&mut labels, "tag_", &resource.tags);
                if let Some(context) = &group.context {
                    self.insert_context(&mut labels, context);
                }
                records.push(EmittedRecord::new(
                    self.convention.info_metric_name(&resource.namespace),
                    labels,
                    0.0,
                ));
            }
        }
        records
    }

    fn insert_context(&self, labels: &mut Labels, context: &ScrapeContext) {
        labels.insert("account_id".to_string(), context.account_id.clone());
        labels.insert("region".to_string(), context.region.clone());
        if let Some(alias) = context.account_alias.as_deref().filter(|alias| !alias.is_empty()) {
            labels.insert("account_alias".to_string(), alias.to_string());
        }
        self.insert_tags(labels, "custom_tag_", &context.custom_tags);
    }

    fn insert_tags(&self, labels: &mut Labels, prefix: &str, tags: &[Tag]) {
        for tag in tags {
            self.insert_prefixed(labels, prefix, &tag.key, &tag.value);
        }
    }

    fn insert_prefixed(&self, labels: &mut Labels, prefix: &str, key: &str, value: &str) {
        match label_key(key, self.labels_snake_case) {
            Some(key) => {
                labels.insert(format!("{prefix}{key}"), value.to_string());
            }
            None => warn!(target: "records", key, prefix, "skipping invalid label key"),
        }
    }
}

pub fn build_sample_records(samples: &[RawSample], labels_snake_case: bool) -> Vec<EmittedRecord> {
    RecordBuilder::new(labels_snake_case).sample_records(samples)
}

pub fn build_info_records(
    groups: &[ResourceGroup],
    existing: Vec<EmittedRecord>,
    labels_snake_case: bool,
) -> Vec<EmittedRecord> {
    RecordBuilder::new(labels_snake_case).info_records(groups, existing)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use nimbus_domain::{Dimension, TaggedResource};

    use super::*;

    const REDIS: &str = "arn:aws:elasticache:us-east-1:123456789012:cluster:redis-cluster";

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn context() -> ScrapeContext {
        ScrapeContext {
            region: "us-east-1".to_string(),
            account_id: "123456789012".to_string(),
            account_alias: None,
            custom_tags: Vec::new(),
        }
    }

    fn elasticache(metric: &str, value: Option<f64>) -> RawSample {
        RawSample {
            namespace: "AWS/ElastiCache".to_string(),
            metric_name: metric.to_string(),
            statistic: "Average".to_string(),
            dimensions: vec![Dimension::new("CacheClusterId", "redis-cluster")],
            value,
            timestamp: ts(),
            resource_name: REDIS.to_string(),
            tags: Vec::new(),
            context: context(),
            nil_to_zero: false,
            add_cloudwatch_timestamp: false,
        }
    }

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn sample_records_carry_identity_labels() {
        let mut timestamped = elasticache("NetworkBytesOut", Some(4.0));
        timestamped.add_cloudwatch_timestamp = true;
        let records = build_sample_records(
            &[elasticache("FreeableMemory", Some(2.0)), timestamped],
            false,
        );

        let expected_labels = labels(&[
            ("account_id", "123456789012"),
            ("name", REDIS),
            ("region", "us-east-1"),
            ("dimension_CacheClusterId", "redis-cluster"),
        ]);
        assert_eq!(records[0].name, "aws_elasticache_freeable_memory_average");
        assert_eq!(records[0].labels, expected_labels);
        assert_eq!(records[0].value, 2.0);
        assert_eq!(records[0].timestamp, Some(ts()));
        assert!(!records[0].include_timestamp);

        assert_eq!(records[1].name, "aws_elasticache_network_bytes_out_average");
        assert!(records[1].include_timestamp);
    }

    #[test]
    fn another_convention_names_samples_and_resources() {
        const GCP: NamespaceConvention = NamespaceConvention {
            name_prefix: "gcp",
            provider_tokens: &["gcp"],
            delimiters: &['/', '.'],
        };
        let builder = RecordBuilder::new(false).with_convention(GCP);
        let mut sample = elasticache("SendRequestCount", Some(3.0));
        sample.namespace = "GCP/pubsub.topic".to_string();
        let group = ResourceGroup {
            context: None,
            resources: vec![TaggedResource {
                arn: "projects/p/topics/orders".to_string(),
                namespace: "GCP/pubsub.topic".to_string(),
                region: "us-east1".to_string(),
                tags: Vec::new(),
            }],
        };

        let records = builder.info_records(&[group], builder.sample_records(&[sample]));
        assert_eq!(records[0].name, "gcp_pubsub_topic_send_request_count_average");
        assert_eq!(records[1].name, "gcp_pubsub_topic_info");
    }

    #[test]
    fn missing_values_follow_the_nil_policy() {
        let mut zeroed = elasticache("CPUUtilization", None);
        zeroed.nil_to_zero = true;
        let mut timestamped = elasticache("NetworkBytesOut", None);
        timestamped.add_cloudwatch_timestamp = true;
        let records = build_sample_records(
            &[zeroed, elasticache("FreeableMemory", None), timestamped],
            false,
        );

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value, 0.0);
        assert!(records[1].value.is_nan());
        assert!(records[2].value.is_nan());
    }

    #[test]
    fn snake_case_applies_to_dimensions_and_tags() {
        let mut sample = elasticache("CPUUtilization", Some(1.0));
        sample.tags = vec![Tag::new("ManagedBy", "terraform")];
        sample.context.custom_tags = vec![Tag::new("billable-to", "api")];
        sample.context.account_alias = Some("billingacct".to_string());

        let records = build_sample_records(&[sample], true);
        assert_eq!(
            records[0].labels,
            labels(&[
                ("account_alias", "billingacct"),
                ("account_id", "123456789012"),
                ("custom_tag_billable_to", "api"),
                ("dimension_cache_cluster_id", "redis-cluster"),
                ("name", REDIS),
                ("region", "us-east-1"),
                ("tag_managed_by", "terraform"),
            ])
        );
    }

    #[test]
    fn invalid_keys_are_skipped() {
        let mut sample = elasticache("CPUUtilization", Some(1.0));
        sample.tags = vec![Tag::new("", "x"), Tag::new("9lives", "y"), Tag::new("team", "z")];
        let records = build_sample_records(&[sample], false);
        assert!(records[0].labels.contains_key("tag_team"));
        assert_eq!(records[0].labels.len(), 5);
    }

    #[test]
    fn info_records_without_context() {
        let group = ResourceGroup {
            context: None,
            resources: vec![TaggedResource {
                arn: REDIS.to_string(),
                namespace: "AWS/ElastiCache".to_string(),
                region: "us-east-1".to_string(),
                tags: vec![Tag::new("CustomTag", "tag_Value")],
            }],
        };

        let plain = build_info_records(std::slice::from_ref(&group), Vec::new(), false);
        assert_eq!(
            plain,
            vec![EmittedRecord::new(
                "aws_elasticache_info",
                labels(&[("name", REDIS), ("tag_CustomTag", "tag_Value")]),
                0.0,
            )]
        );

        let snake = build_info_records(&[group], Vec::new(), true);
        assert!(snake[0].labels.contains_key("tag_custom_tag"));
    }

    #[test]
    fn info_records_with_context_and_existing_batch() {
        let existing = EmittedRecord::new(
            "aws_ec2_cpuutilization_maximum",
            labels(&[("name", "arn:aws:ec2:us-east-1:123456789012:instance/i-abc123")]),
            0.0,
        );
        let group = ResourceGroup {
            context: Some(ScrapeContext {
                region: "us-east-2".to_string(),
                account_id: "12345".to_string(),
                account_alias: None,
                custom_tags: vec![Tag::new("billable-to", "api")],
            }),
            resources: vec![TaggedResource {
                arn: "arn:aws:sagemaker:us-east-1:123456789012:training-job/xgboost".to_string(),
                namespace: "/aws/sagemaker/TrainingJobs".to_string(),
                region: "us-east-1".to_string(),
                tags: vec![Tag::new("cache_name", "cache_instance_1")],
            }],
        };

        let records = build_info_records(&[group], vec![existing.clone()], true);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], existing);
        assert_eq!(records[1].name, "aws_sagemaker_trainingjobs_info");
        assert_eq!(
            records[1].labels,
            labels(&[
                ("account_id", "12345"),
                ("custom_tag_billable_to", "api"),
                ("name", "arn:aws:sagemaker:us-east-1:123456789012:training-job/xgboost"),
                ("region", "us-east-2"),
                ("tag_cache_name", "cache_instance_1"),
            ])
        );
        assert_eq!(records[1].timestamp, None);
    }
}
