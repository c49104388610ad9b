use std::fmt::Write as _;

use nimbus_application::ConfigWarning;
use nimbus_domain::{JobsConfig, MetricConfig};

pub fn summary(jobs: &JobsConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} jobs ({} discovery, {} static, {} custom namespace), {} metrics",
        jobs.job_count(),
        jobs.discovery_jobs.len(),
        jobs.static_jobs.len(),
        jobs.custom_namespace_jobs.len(),
        jobs.metric_count(),
    );
    for job in &jobs.discovery_jobs {
        job_line(&mut out, "discovery", &job.namespace, &job.regions, &job.metrics);
    }
    for job in &jobs.static_jobs {
        let label = format!("{} {}", job.name, job.namespace);
        job_line(&mut out, "static", &label, &job.regions, &job.metrics);
    }
    for job in &jobs.custom_namespace_jobs {
        let label = format!("{} {}", job.name, job.namespace);
        job_line(&mut out, "custom", &label, &job.regions, &job.metrics);
    }
    out
}

pub fn warnings(warnings: &[ConfigWarning]) -> String {
    warnings
        .iter()
        .map(|warning| format!("warning: {warning}\n"))
        .collect()
}

fn job_line(out: &mut String, kind: &str, label: &str, regions: &[String], metrics: &[MetricConfig]) {
    let _ = writeln!(
        out,
        "  {kind:<9} {label} regions={} metrics={}",
        regions.join(","),
        metrics.len()
    );
    for metric in metrics {
        let _ = writeln!(
            out,
            "    {} [{}] period={}s length={}s",
            metric.name,
            metric.statistics.join(","),
            metric.period,
            metric.length
        );
    }
}

#[cfg(test)]
mod tests {
    use nimbus_domain::StaticJob;

    use super::*;

    #[test]
    fn summary_lists_jobs_and_metrics() {
        let jobs = JobsConfig {
            static_jobs: vec![StaticJob {
                name: "vpn".to_string(),
                namespace: "AWS/VPN".to_string(),
                regions: vec!["us-east-1".to_string(), "eu-west-1".to_string()],
                roles: Vec::new(),
                custom_tags: Vec::new(),
                dimensions: Vec::new(),
                metrics: vec![MetricConfig {
                    name: "TunnelState".to_string(),
                    statistics: vec!["Maximum".to_string()],
                    period: 300,
                    length: 300,
                    delay: 0,
                    nil_to_zero: false,
                    add_cloudwatch_timestamp: false,
                }],
            }],
            ..JobsConfig::default()
        };

        let text = summary(&jobs);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "1 jobs (0 discovery, 1 static, 0 custom namespace), 1 metrics");
        assert_eq!(lines[1], "  static    vpn AWS/VPN regions=us-east-1,eu-west-1 metrics=1");
        assert_eq!(lines[2], "    TunnelState [Maximum] period=300s length=300s");
    }

    #[test]
    fn warnings_are_prefixed() {
        let text = warnings(&[ConfigWarning::MissingApiVersion]);
        assert_eq!(text, "warning: missing apiVersion\n");
    }
}
