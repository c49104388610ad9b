//! Metric family names and label keys.

/// How provider namespaces are turned into name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceConvention {
    /// First segment of every family name.
    pub name_prefix: &'static str,
    /// Leading namespace segments dropped case-insensitively.
    pub provider_tokens: &'static [&'static str],
    /// Characters that split a namespace into path segments.
    pub delimiters: &'static [char],
}

pub const AWS: NamespaceConvention = NamespaceConvention {
    name_prefix: "aws",
    provider_tokens: &["aws"],
    delimiters: &['/', ':'],
};

impl Default for NamespaceConvention {
    fn default() -> Self {
        AWS
    }
}

impl NamespaceConvention {
    /// Lowercased namespace segments with the provider segment removed. The last
    /// one is the service token.
    pub fn namespace_segments(&self, namespace: &str) -> Vec<String> {
        let mut segments = namespace
            .split(|c: char| self.delimiters.contains(&c))
            .filter(|segment| !segment.is_empty())
            .peekable();
        segments.next_if(|first| self.is_provider_token(first));
        segments
            .map(|segment| sanitize(&segment.to_lowercase()))
            .collect()
    }

    pub fn metric_name(&self, namespace: &str, metric: &str, statistic: &str) -> String {
        let mut prefix = self.namespace_segments(namespace);
        let metric = normalize_metric_token(metric);
        let statistic = normalize_metric_token(statistic);
        let repeats_service = prefix.last().is_some_and(|service| {
            metric
                .strip_prefix(service.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
        });
        if repeats_service {
            prefix.pop();
        }
        self.join(
            prefix
                .iter()
                .map(String::as_str)
                .chain([metric.as_str(), statistic.as_str()]),
        )
    }

    pub fn info_metric_name(&self, namespace: &str) -> String {
        let prefix = self.namespace_segments(namespace);
        self.join(prefix.iter().map(String::as_str).chain(["info"]))
    }

    fn is_provider_token(&self, segment: &str) -> bool {
        self.provider_tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(segment))
    }

    fn join<'s>(&self, parts: impl Iterator<Item = &'s str>) -> String {
        let mut name = self.name_prefix.to_string();
        for part in parts.filter(|part| !part.is_empty()) {
            name.push('_');
            name.push_str(part);
        }
        name
    }
}

pub fn metric_name(namespace: &str, metric: &str, statistic: &str) -> String {
    AWS.metric_name(namespace, metric, statistic)
}

pub fn info_metric_name(namespace: &str) -> String {
    AWS.info_metric_name(namespace)
}

/// `.` becomes `_`, a lower-to-upper boundary gains a `_`, then everything is
/// lowercased and sanitized. Acronym runs such as `CPU` stay joined.
pub fn normalize_metric_token(raw: &str) -> String {
    let mut token = String::with_capacity(raw.len() + 4);
    let mut previous: Option<char> = None;
    for c in raw.chars() {
        let c = if c == '.' { '_' } else { c };
        if starts_word(previous, c) {
            token.push('_');
        }
        token.extend(c.to_lowercase());
        previous = Some(c);
    }
    sanitize(&token)
}

/// The camel-case boundary shared by metric tokens and label keys.
fn starts_word(previous: Option<char>, c: char) -> bool {
    c.is_uppercase() && previous.is_some_and(char::is_lowercase)
}

/// Turns a dimension or tag key into a label key fragment.
///
/// Returns `None` when the result cannot start a label name.
pub fn label_key(key: &str, snake_case: bool) -> Option<String> {
    let key = if snake_case {
        to_snake_case(key)
    } else {
        key.to_string()
    };
    let key = sanitize(&key);
    match key.chars().next() {
        Some(first) if !first.is_ascii_digit() => Some(key),
        _ => None,
    }
}

fn to_snake_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut previous: Option<char> = None;
    for c in raw.chars() {
        if matches!(c, '-' | '.' | ' ' | '_') {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        } else {
            if starts_word(previous, c) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        }
        previous = Some(c);
    }
    out
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_namespace() {
        assert_eq!(
            metric_name("AWS/ElastiCache", "CPUUtilization", "Average"),
            "aws_elasticache_cpuutilization_average"
        );
    }

    #[test]
    fn path_style_namespace() {
        assert_eq!(
            metric_name("/aws/sagemaker/TrainingJobs", "CPUUtilization", "Average"),
            "aws_sagemaker_trainingjobs_cpuutilization_average"
        );
    }

    #[test]
    fn metric_repeating_the_service_drops_it_from_the_prefix() {
        assert_eq!(
            metric_name("Glue", "glue.driver.aggregate.bytesRead", "Average"),
            "aws_glue_driver_aggregate_bytes_read_average"
        );
        assert_eq!(metric_name("Glue", "glue", "Sum"), "aws_glue_sum");
    }

    #[test]
    fn service_inside_the_metric_is_kept() {
        assert_eq!(
            metric_name("Glue", "aggregate.glue.jobs.bytesRead", "Average"),
            "aws_glue_aggregate_glue_jobs_bytes_read_average"
        );
        assert_eq!(
            metric_name("Glue", "gluey.jobs", "Average"),
            "aws_glue_gluey_jobs_average"
        );
    }

    #[test]
    fn statistics_are_normalized_like_metrics() {
        assert_eq!(
            metric_name("AWS/ApplicationELB", "TargetResponseTime", "p99.9"),
            "aws_applicationelb_target_response_time_p99_9"
        );
        assert_eq!(
            metric_name("AWS/SQS", "NumberOfMessagesSent", "SampleCount"),
            "aws_sqs_number_of_messages_sent_sample_count"
        );
    }

    #[test]
    fn info_names_use_the_full_prefix() {
        assert_eq!(info_metric_name("AWS/ElastiCache"), "aws_elasticache_info");
        assert_eq!(
            info_metric_name("/aws/sagemaker/TrainingJobs"),
            "aws_sagemaker_trainingjobs_info"
        );
    }

    #[test]
    fn conventions_are_configurable() {
        let convention = NamespaceConvention {
            name_prefix: "gcp",
            provider_tokens: &["gcp", "google"],
            delimiters: &['.', '/'],
        };
        assert_eq!(
            convention.namespace_segments("google.cloudsql/Database"),
            vec!["cloudsql", "database"]
        );
        assert_eq!(
            convention.metric_name("google.cloudsql/Database", "CpuUtilization", "Mean"),
            "gcp_cloudsql_database_cpu_utilization_mean"
        );
    }

    #[test]
    fn camel_boundaries_only_split_after_lowercase() {
        assert_eq!(normalize_metric_token("CPUUtilization"), "cpuutilization");
        assert_eq!(normalize_metric_token("FreeableMemory"), "freeable_memory");
        assert_eq!(normalize_metric_token("5xxErrorRate"), "5xx_error_rate");
        assert_eq!(normalize_metric_token("Latency-p50"), "latency_p50");
    }

    #[test]
    fn label_keys_follow_the_casing_toggle() {
        assert_eq!(label_key("CacheClusterId", false).as_deref(), Some("CacheClusterId"));
        assert_eq!(label_key("CacheClusterId", true).as_deref(), Some("cache_cluster_id"));
        assert_eq!(label_key("CustomTag", true).as_deref(), Some("custom_tag"));
        assert_eq!(label_key("billable-to", true).as_deref(), Some("billable_to"));
        assert_eq!(label_key("billable-to", false).as_deref(), Some("billable_to"));
        assert_eq!(label_key("cache_name", true).as_deref(), Some("cache_name"));
        assert_eq!(label_key("HTTPCode", true).as_deref(), Some("httpcode"));
        assert_eq!(label_key("targetGroupARN", true).as_deref(), Some("target_group_arn"));
        assert_eq!(
            label_key("aws:cloudformation:stack-name", false).as_deref(),
            Some("aws_cloudformation_stack_name")
        );
    }

    #[test]
    fn label_keys_and_metric_tokens_split_words_alike() {
        for raw in ["HTTPCode", "CPUUtilization", "FreeableMemory", "targetGroupARN"] {
            assert_eq!(label_key(raw, true), Some(normalize_metric_token(raw)), "{raw}");
        }
    }

    #[test]
    fn unusable_label_keys_are_rejected() {
        assert_eq!(label_key("", false), None);
        assert_eq!(label_key("1st", false), None);
    }
}
