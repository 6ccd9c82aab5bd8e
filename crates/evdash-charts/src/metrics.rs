//! Derived scalars: means and percentage breakdowns.

use evdash_common::VehicleRecord;

/// Arithmetic mean, `NaN` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Mean electric range of a group, in miles.
///
/// Zero-range (unresearched) records are included as zeros. An empty group
/// yields `NaN`, which serializes as `null`.
pub fn mean_electric_range<'a>(records: impl IntoIterator<Item = &'a VehicleRecord>) -> f64 {
    mean(records.into_iter().map(|r| f64::from(r.electric_range)))
}

/// `part / total * 100`, rounded to two decimals; `0.0` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 2)
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
