//! Metric Identity & Label-Schema Engine.
//!
//! Turns raw provider samples and discovered resources into named records whose
//! label keys agree within each metric family.

pub mod datapoint;
pub mod naming;
pub mod records;
pub mod schema;


pub use datapoint::{collapse_window, newest_datapoint, sort_by_timestamp};
pub use naming::{
    AWS, NamespaceConvention, info_metric_name, label_key, metric_name, normalize_metric_token,
};
pub use records::{RecordBuilder, build_info_records, build_sample_records};
pub use schema::{LabelSchema, SchemaMap, reconcile};
