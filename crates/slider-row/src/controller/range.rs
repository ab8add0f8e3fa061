use serde::Serialize;

use crate::error::ConfigError;

/// The numeric domain of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Build a range from device-reported bounds, repairing what a broken
    /// integration may send: non-finite bounds fall back to the defaults,
    /// an inverted range collapses onto `min` and a non-positive step
    /// becomes the default step.
    pub fn sanitized(min: f64, max: f64, step: f64, defaults: Range) -> Self {
        let min = if min.is_finite() { min } else { defaults.min };
        let max = if max.is_finite() { max } else { defaults.max };
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            defaults.step
        };
        Self {
            min,
            max: max.max(min),
            step,
        }
    }

    /// Clamp into `[min, max]`. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Clamp, then snap to the nearest multiple of `step` counted from `min`.
    /// A max that is not step-aligned is never exceeded.
    pub fn quantize(&self, value: f64) -> f64 {
        let value = self.clamp(value);
        if !(self.step > 0.0) {
            return value;
        }
        let decimals = self.decimals();
        let steps = ((value - self.min) / self.step).round();
        let mut snapped = round_to(self.min + steps * self.step, decimals);
        // Float noise on an aligned max stays within a sliver of a step.
        if snapped > self.max + self.step * 1e-9 {
            snapped = round_to(snapped - self.step, decimals);
        }
        snapped.max(self.min)
    }

    /// Number of decimals needed to print any step-aligned value exactly.
    pub fn decimals(&self) -> usize {
        decimals_of(self.step).max(decimals_of(self.min))
    }

    /// Format a value with the precision the step implies.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals(), value)
    }
}

/// `min`/`max`/`step` from the row config, overriding the kind's range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl RangeOverride {
    pub fn new(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRange {
            min: min.unwrap_or(f64::NAN),
            max: max.unwrap_or(f64::NAN),
            step: step.unwrap_or(f64::NAN),
        };
        if [min, max, step].iter().flatten().any(|v| !v.is_finite()) {
            return Err(invalid());
        }
        if step.is_some_and(|s| s <= 0.0) {
            return Err(invalid());
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(invalid());
            }
        }
        Ok(Self { min, max, step })
    }

    pub fn apply(&self, base: Range) -> Range {
        let min = self.min.unwrap_or(base.min);
        let max = self.max.unwrap_or(base.max);
        Range {
            min,
            // Only one bound overridden can still cross the other.
            max: max.max(min),
            step: self.step.unwrap_or(base.step),
        }
    }
}

fn decimals_of(value: f64) -> usize {
    let value = value.abs();
    (0..=6)
        .find(|d| {
            let scaled = value * 10f64.powi(*d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6)
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
