//! Domain models and invariants.

pub mod config;
pub mod jobs;
pub mod metrics;
pub mod service;

pub use config::{
    API_VERSION, CustomNamespaceJobSpec, Dimension, Discovery, DiscoveryJobSpec,
    JobLevelDefaults, MetricSpec, Role, ScrapeConfig, StaticJobSpec, Tag,
};
pub use jobs::{
    CustomNamespaceJob, DEFAULT_LENGTH_SECONDS, DEFAULT_PERIOD_SECONDS, DimensionsRegexp,
    DiscoveryJob, JobsConfig, MetricConfig, SearchTag, StaticJob,
};
pub use metrics::{
    Datapoint, EmittedRecord, LabelSet, Labels, RawSample, ResourceGroup, ScrapeContext,
    TaggedResource,
};
pub use service::ServiceDescriptor;
