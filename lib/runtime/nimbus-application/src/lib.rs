//! Configuration resolution and metric identity.

pub mod cascade;
pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod loader;
pub mod resolver;
pub mod warning;


pub use cascade::{Cascade, first_set};
pub use diagnostics::diagnose;
pub use error::{AliasSite, ConfigError, JobCategory, JobRef, MetricRef};
pub use identity::{
    LabelSchema, NamespaceConvention, RecordBuilder, SchemaMap, build_info_records,
    build_sample_records, collapse_window, info_metric_name, metric_name, newest_datapoint,
    reconcile, sort_by_timestamp,
};
pub use loader::{load_from_path, load_from_str};
pub use resolver::{Resolution, Resolver, resolve};
pub use warning::ConfigWarning;
