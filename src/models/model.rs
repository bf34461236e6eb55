//! Single-site saturation binding curve.
//!
//! `y(c) = (ymax - ymin) * c / (EC50 + c) + ymin`
//!
//! The curve rises from `ymin` at `c = 0` towards `ymax` and is half-way at
//! `c = EC50`.

use crate::domain::SampleRecord;

/// Predicted response of `sample` at concentration `conc`.
///
/// With `EC50 >= 0` the denominator is positive for every `conc > 0`.
pub fn response(sample: &SampleRecord, conc: f64) -> f64 {
    (sample.ymax - sample.ymin) * (conc / (sample.ec50 + conc)) + sample.ymin
}

/// Responses of every sample at `conc`, in table order.
pub fn responses_at(samples: &[SampleRecord], conc: f64) -> Vec<f64> {
    samples.iter().map(|s| response(s, conc)).collect()
}
