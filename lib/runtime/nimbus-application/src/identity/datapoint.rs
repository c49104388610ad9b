//! Picking one datapoint out of a query window.

use nimbus_domain::{Datapoint, RawSample};

/// Newest first. Equal timestamps keep their input order.
pub fn sort_by_timestamp(datapoints: &mut [Datapoint]) {
    datapoints.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// The newest datapoint, the earliest in input order among equals.
pub fn newest_datapoint(datapoints: &[Datapoint]) -> Option<&Datapoint> {
    datapoints
        .iter()
        .reduce(|newest, candidate| {
            if candidate.timestamp > newest.timestamp {
                candidate
            } else {
                newest
            }
        })
}

/// Reduces a window to its newest datapoint. An empty window leaves the sample
/// without a value.
pub fn collapse_window(sample: &mut RawSample, window: &[Datapoint]) {
    match newest_datapoint(window) {
        Some(newest) => {
            sample.value = newest.value;
            sample.timestamp = newest.timestamp;
        }
        None => sample.value = None,
    }
}
