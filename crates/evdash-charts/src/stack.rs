//! Stacked-series assembly for the stacked bar charts.

use serde::Serialize;
use tracing::warn;

/// Rows that expose named numeric fields for stacking.
pub trait StackValues {
    /// Value of the named field, `None` if the row has no such field.
    fn stack_value(&self, key: &str) -> Option<f64>;
}

/// One segment of a stacked bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StackPoint {
    /// Lower edge.
    pub baseline: f64,
    /// Upper edge.
    pub top: f64,
}

impl StackPoint {
    /// Segment height.
    pub fn height(&self) -> f64 {
        self.top - self.baseline
    }
}

/// All segments for one key, one point per input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedSeries {
    /// Stack key.
    pub key: String,
    /// Position of the key in the stacking order, 0 at the bottom.
    pub index: usize,
    /// One segment per row, in row order.
    pub points: Vec<StackPoint>,
}

/// Stacks `keys` bottom-to-top for every row.
///
/// Series come back in exactly the order of `keys`. For each row the first
/// key starts at zero and every following key starts where the previous one
/// ended. A key the row does not have contributes a zero-height segment.
pub fn stack<R: StackValues>(rows: &[R], keys: &[&str]) -> Vec<StackedSeries> {
    let mut baselines = vec![0.0; rows.len()];
    let mut missing = Vec::new();

    let series = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let points = rows
                .iter()
                .zip(baselines.iter_mut())
                .map(|(row, baseline)| {
                    let value = row.stack_value(key).unwrap_or_else(|| {
                        if !missing.contains(key) {
                            missing.push(*key);
                        }
                        0.0
                    });
                    let point = StackPoint {
                        baseline: *baseline,
                        top: *baseline + value,
                    };
                    *baseline = point.top;
                    point
                })
                .collect();
            StackedSeries {
                key: (*key).to_string(),
                index,
                points,
            }
        })
        .collect();

    if !missing.is_empty() {
        warn!(keys = ?missing, "stack keys missing from rows, stacked as zero");
    }

    series
}
