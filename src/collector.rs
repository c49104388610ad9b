use std::path::Path;
use std::sync::Arc;

use nimbus_adapter_catalog::ServiceCatalog;
use nimbus_application::{
    ConfigError, ConfigWarning, LabelSchema, RecordBuilder, load_from_path, load_from_str,
};
use nimbus_domain::{EmittedRecord, JobsConfig, RawSample, ResourceGroup};
use nimbus_ports::PortSet;

/// A resolved configuration plus the label schema its records are reconciled
/// against. Safe to share between scrape pipelines.
pub struct Collector {
    ports: PortSet,
    jobs: JobsConfig,
    warnings: Vec<ConfigWarning>,
    builder: RecordBuilder,
    schema: LabelSchema,
}

impl Collector {
    pub fn builtin_ports() -> PortSet {
        PortSet::new(Arc::new(ServiceCatalog::builtin()))
    }

    pub fn from_yaml(raw: &str, labels_snake_case: bool) -> Result<Self, ConfigError> {
        Self::from_yaml_with_ports(raw, labels_snake_case, Self::builtin_ports())
    }

    pub fn from_yaml_with_ports(
        raw: &str,
        labels_snake_case: bool,
        ports: PortSet,
    ) -> Result<Self, ConfigError> {
        let resolution = load_from_str(raw, ports.registry.as_ref())?;
        Ok(Self::assemble(ports, resolution.jobs, resolution.warnings, labels_snake_case))
    }

    pub fn from_path(path: impl AsRef<Path>, labels_snake_case: bool) -> Result<Self, ConfigError> {
        let ports = Self::builtin_ports();
        let resolution = load_from_path(path, ports.registry.as_ref())?;
        Ok(Self::assemble(ports, resolution.jobs, resolution.warnings, labels_snake_case))
    }

    fn assemble(
        ports: PortSet,
        jobs: JobsConfig,
        warnings: Vec<ConfigWarning>,
        labels_snake_case: bool,
    ) -> Self {
        Self {
            ports,
            jobs,
            warnings,
            builder: RecordBuilder::new(labels_snake_case),
            schema: LabelSchema::new(),
        }
    }

    pub fn ports(&self) -> &PortSet {
        &self.ports
    }

    pub fn jobs(&self) -> &JobsConfig {
        &self.jobs
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    /// Builds sample and info records for one scrape and reconciles them against
    /// every family seen so far.
    pub fn collect(&self, samples: &[RawSample], resources: &[ResourceGroup]) -> Vec<EmittedRecord> {
        let records = self.builder.sample_records(samples);
        let records = self.builder.info_records(resources, records);
        self.schema.reconcile(records)
    }
}
