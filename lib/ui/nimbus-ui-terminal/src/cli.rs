use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use nimbus_adapter_catalog::ServiceCatalog;
use nimbus_application::{LabelSchema, RecordBuilder, load_from_path, metric_name};

use crate::batch::{Capture, assemble};
use crate::format;
use crate::logging::init_logging;

/// Resolve scrape configurations and derive metric records.
#[derive(Debug, Parser)]
#[command(name = "nimbus", version)]
pub struct Cli {
    /// Log directives, e.g. `info` or `warn,config=debug`.
    #[arg(long, global = true, env = "NIMBUS_LOG", default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load, validate and resolve a configuration file.
    Check {
        #[arg(env = "NIMBUS_CONFIG_PATH")]
        config: PathBuf,
        /// Print the resolved model as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the family name for a namespace, metric and statistic.
    Name {
        namespace: String,
        metric: String,
        statistic: String,
    },
    /// Build reconciled records from a JSON capture of samples and resources.
    Records {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long, env = "NIMBUS_LABELS_SNAKE_CASE")]
        labels_snake_case: bool,
    },
}

pub fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    execute(cli.command, &mut io::stdout().lock())
}

pub fn execute(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Check { config, json } => {
            let catalog = ServiceCatalog::builtin();
            let resolution = load_from_path(&config, &catalog)
                .with_context(|| format!("invalid configuration {}", config.display()))?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &resolution.jobs)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", format::warnings(&resolution.warnings))?;
                write!(out, "{}", format::summary(&resolution.jobs))?;
            }
        }
        Command::Name {
            namespace,
            metric,
            statistic,
        } => {
            writeln!(out, "{}", metric_name(&namespace, &metric, &statistic))?;
        }
        Command::Records {
            samples,
            labels_snake_case,
        } => {
            let capture = Capture::load(&samples)?;
            let schema = LabelSchema::new();
            let records = assemble(capture, RecordBuilder::new(labels_snake_case), &schema);
            info!(
                records = records.len(),
                families = schema.family_count(),
                "records assembled"
            );
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn name_prints_the_family() {
        let text = output(Command::Name {
            namespace: "Glue".to_string(),
            metric: "glue.driver.aggregate.bytesRead".to_string(),
            statistic: "Average".to_string(),
        })
        .unwrap();
        assert_eq!(text, "aws_glue_driver_aggregate_bytes_read_average\n");
    }

    #[test]
    fn check_reports_summary_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "apiVersion: v1alpha1\ndiscovery:\n  jobs:\n    - type: AWS/EC2\n      regions: [us-east-1]\n      metrics:\n        - name: CPUUtilization\n          statistics: [Average]\n",
        )
        .unwrap();
        let text = output(Command::Check {
            config: path.clone(),
            json: false,
        })
        .unwrap();
        assert!(text.starts_with("1 jobs (1 discovery, 0 static, 0 custom namespace), 1 metrics"));

        let json = output(Command::Check { config: path, json: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["discovery_jobs"][0]["namespace"], "AWS/EC2");

        std::fs::write(dir.path().join("alias.yml"), "discovery:\n  jobs:\n    - type: ec2\n").unwrap();
        let err = output(Command::Check {
            config: dir.path().join("alias.yml"),
            json: false,
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("rather than alias \"ec2\""));
    }

    #[test]
    fn arguments_parse() {
        let cli = Cli::try_parse_from(["nimbus", "records", "--samples", "capture.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Records { labels_snake_case: false, .. }
        ));
    }
}
