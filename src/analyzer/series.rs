use ndarray::{s, Array, Array1};

use super::lifetimes::LifetimeInterval;

/// Population count per tick: entry `t` is the number of lifetimes with
/// `born <= t < died`. Implemented by adding 1 over each interval's window,
/// both ends clamped to the series length.
pub fn lifetimes_to_counts(lifetimes: &[LifetimeInterval], duration: usize) -> Array1<u32> {
    let mut counts: Array1<u32> = Array::zeros(duration);
    for lifetime in lifetimes {
        let start = (lifetime.born as usize).min(duration);
        let end = (lifetime.died as usize).min(duration);
        if start < end {
            let mut window = counts.slice_mut(s![start..end]);
            window += 1;
        }
    }
    counts
}

/// Supply usage per tick, `count[t] * supply_per_unit`.
pub fn counts_to_supply(counts: &Array1<u32>, supply_per_unit: f64) -> Array1<f64> {
    counts.mapv(|count| f64::from(count) * supply_per_unit)
}
