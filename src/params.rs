//! Per-sample gate parameters and their panel ranges.

use serde::Deserialize;

/// Full-scale control voltage, in volts, for CV inputs.
pub const CV_FULL_SCALE: f64 = 10.0;

/// The range and default of a single panel parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamRange {
    /// Oscillator speed in Hz.
    pub const FREQUENCY: ParamRange = ParamRange {
        name: "frequency",
        min: 0.1,
        max: 20.0,
        default: 1.0,
    };

    /// Fraction of each passing cycle that is high.
    pub const PULSE_WIDTH: ParamRange = ParamRange {
        name: "pulse_width",
        min: 0.01,
        max: 0.99,
        default: 0.5,
    };

    /// Probability that a freshly rolled cycle is suppressed.
    pub const GATE_PROBABILITY: ParamRange = ParamRange {
        name: "gate_probability",
        min: 0.0,
        max: 1.0,
        default: 0.0,
    };

    /// Scales the longest run of forced passing cycles (up to 10 at 1.0).
    pub const BLEED: ParamRange = ParamRange {
        name: "bleed",
        min: 0.0,
        max: 1.0,
        default: 0.0,
    };

    /// Clamps `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Returns true if `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Sums a control voltage into a knob value and clamps the result.
    ///
    /// A CV of `CV_FULL_SCALE` volts sweeps the whole range, so `cv_volts`
    /// is scaled by `(max - min) / CV_FULL_SCALE` before it is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use bleedgate::ParamRange;
    ///
    /// // +5 V moves the gate probability halfway across its range
    /// assert_eq!(ParamRange::GATE_PROBABILITY.resolve(0.25, 5.0), 0.75);
    /// // and the result never leaves the range
    /// assert_eq!(ParamRange::GATE_PROBABILITY.resolve(0.75, 10.0), 1.0);
    /// ```
    pub fn resolve(&self, knob: f64, cv_volts: f64) -> f64 {
        let span = self.max - self.min;
        self.clamp(knob + cv_volts * span / CV_FULL_SCALE)
    }
}

/// The four scalars the gate core reads on every sample.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GateParams {
    /// Cycles per second
    pub frequency: f64,
    /// Fraction of a passing cycle during which the output is high
    pub pulse_width: f64,
    /// Probability in [0, 1] that a newly rolled cycle is suppressed
    pub gate_probability: f64,
    /// In [0, 1]; scales the length of forced passing runs
    pub bleed: f64,
}

impl Default for GateParams {
    fn default() -> Self {
        Self {
            frequency: ParamRange::FREQUENCY.default,
            pulse_width: ParamRange::PULSE_WIDTH.default,
            gate_probability: ParamRange::GATE_PROBABILITY.default,
            bleed: ParamRange::BLEED.default,
        }
    }
}

impl GateParams {
    /// Creates parameters from raw values; nothing is clamped.
    pub fn new(frequency: f64, pulse_width: f64, gate_probability: f64, bleed: f64) -> Self {
        Self {
            frequency,
            pulse_width,
            gate_probability,
            bleed,
        }
    }

    /// Returns a copy with every field clamped to its panel range.
    pub fn clamped(self) -> Self {
        Self {
            frequency: ParamRange::FREQUENCY.clamp(self.frequency),
            pulse_width: ParamRange::PULSE_WIDTH.clamp(self.pulse_width),
            gate_probability: ParamRange::GATE_PROBABILITY.clamp(self.gate_probability),
            bleed: ParamRange::BLEED.clamp(self.bleed),
        }
    }

    /// Pairs each field with its range, in panel order.
    pub fn fields(&self) -> [(ParamRange, f64); 4] {
        [
            (ParamRange::FREQUENCY, self.frequency),
            (ParamRange::PULSE_WIDTH, self.pulse_width),
            (ParamRange::GATE_PROBABILITY, self.gate_probability),
            (ParamRange::BLEED, self.bleed),
        ]
    }
}
