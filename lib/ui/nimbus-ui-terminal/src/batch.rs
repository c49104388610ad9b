//! Offline record assembly from a JSON capture of samples and resources.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use nimbus_application::{LabelSchema, RecordBuilder, collapse_window};
use nimbus_domain::{Datapoint, EmittedRecord, RawSample, ResourceGroup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Capture {
    pub samples: Vec<CapturedSample>,
    pub resources: Vec<ResourceGroup>,
}

/// A sample, optionally with every datapoint of its query window.
#[derive(Debug, Deserialize)]
pub struct CapturedSample {
    #[serde(flatten)]
    pub sample: RawSample,
    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

impl Capture {
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse sample capture")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read sample capture {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Samples with their windows collapsed to the newest datapoint.
    pub fn into_samples(self) -> (Vec<RawSample>, Vec<ResourceGroup>) {
        let samples = self
            .samples
            .into_iter()
            .map(|captured| {
                let mut sample = captured.sample;
                if !captured.datapoints.is_empty() {
                    collapse_window(&mut sample, &captured.datapoints);
                }
                sample
            })
            .collect();
        (samples, self.resources)
    }
}

/// Builds sample and info records and reconciles them against `schema`.
pub fn assemble(capture: Capture, builder: RecordBuilder, schema: &LabelSchema) -> Vec<EmittedRecord> {
    let (samples, resources) = capture.into_samples();
    let records = builder.sample_records(&samples);
    let records = builder.info_records(&resources, records);
    schema.reconcile(records)
}
