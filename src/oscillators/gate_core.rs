//! Probabilistic gate core: phase accumulation and per-cycle skip decisions.

use crate::params::GateParams;
use crate::random::{RngSource, UniformSource};

/// Output voltage while the gate is high.
pub const GATE_HIGH_VOLTS: f64 = 10.0;

/// Number of cycles a bleed of 1.0 can hold open (exclusive upper bound).
const BLEED_CYCLES: f64 = 10.0;

/// What happened at a cycle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDecision {
    /// Forced to pass by the hold counter; `remaining` holds are left.
    Held { remaining: u32 },
    /// Rolled and suppressed: the whole cycle stays low.
    Suppressed,
    /// Rolled and passed; `hold` following cycles are forced to pass.
    Passed { hold: u32 },
}

/// The result of one call to [`GateCore::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateOutput {
    /// `GATE_HIGH_VOLTS` while audible, otherwise `0.0`
    pub voltage: f64,
    /// Indicator brightness, `1.0` while audible, otherwise `0.0`
    pub light: f64,
    /// Set only on the sample that crossed a cycle boundary
    pub decision: Option<CycleDecision>,
}

impl GateOutput {
    fn new(audible: bool, decision: Option<CycleDecision>) -> Self {
        let (voltage, light) = if audible {
            (GATE_HIGH_VOLTS, 1.0)
        } else {
            (0.0, 0.0)
        };
        Self {
            voltage,
            light,
            decision,
        }
    }

    /// Returns true if the gate is high on this sample.
    pub fn is_high(&self) -> bool {
        self.voltage > 0.0
    }
}

/// A square-wave gate whose cycles are randomly skipped.
///
/// At each cycle boundary the core either consumes one pending hold (the
/// cycle passes without a roll) or rolls a new decision: the cycle is
/// suppressed with probability `gate_probability`. When a roll passes and
/// `bleed` is positive, a second draw arms `floor(r * bleed * 10)` holds.
///
/// `advance` is O(1) and never allocates, so it is safe to call from an
/// audio callback.
///
/// # Examples
///
/// ```
/// use bleedgate::{GateCore, GateParams};
///
/// let mut core = GateCore::seeded(1);
/// let params = GateParams::new(2.0, 0.5, 0.0, 0.0);
///
/// let high = (0..1000)
///     .filter(|_| core.advance(params, 1.0 / 1000.0).is_high())
///     .count();
/// assert_eq!(high, 500);
/// ```
#[derive(Debug, Clone)]
pub struct GateCore<U: UniformSource = RngSource> {
    /// Fraction of the current cycle elapsed, in [0, 1)
    phase: f64,
    /// Whether the current cycle is forced low
    suppressed: bool,
    /// Upcoming boundaries that pass without a roll
    hold_count: u32,
    source: U,
}

impl GateCore<RngSource> {
    /// Creates a core seeded from operating system entropy.
    pub fn new() -> Self {
        Self::with_source(RngSource::from_entropy())
    }

    /// Creates a core with a reproducible random sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RngSource::seed_from_u64(seed))
    }
}

impl Default for GateCore<RngSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: UniformSource> GateCore<U> {
    /// Creates a core drawing its decisions from `source`.
    pub fn with_source(source: U) -> Self {
        Self {
            phase: 0.0,
            suppressed: false,
            hold_count: 0,
            source,
        }
    }

    /// Advances the gate by one sample of `sample_time` seconds.
    ///
    /// Inputs are not validated. At most one boundary decision is made per
    /// call: when `frequency * sample_time` exceeds one cycle, the extra
    /// cycles are not counted.
    pub fn advance(&mut self, params: GateParams, sample_time: f64) -> GateOutput {
        self.phase += params.frequency * sample_time;

        let decision = if self.phase >= 1.0 {
            self.phase -= 1.0;
            Some(self.decide(params.gate_probability, params.bleed))
        } else {
            None
        };

        let audible = !self.suppressed && self.phase < params.pulse_width;
        GateOutput::new(audible, decision)
    }

    fn decide(&mut self, gate_probability: f64, bleed: f64) -> CycleDecision {
        if self.hold_count > 0 {
            self.suppressed = false;
            self.hold_count -= 1;
            return CycleDecision::Held {
                remaining: self.hold_count,
            };
        }

        self.suppressed = self.source.next_uniform() < gate_probability;
        if self.suppressed {
            return CycleDecision::Suppressed;
        }

        if bleed > 0.0 {
            // float-to-int `as` saturates and truncates toward zero
            self.hold_count = (self.source.next_uniform() * bleed * BLEED_CYCLES) as u32;
        }
        CycleDecision::Passed {
            hold: self.hold_count,
        }
    }

    /// Current phase, in [0, 1) for in-range inputs.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Whether the current cycle is suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Boundaries left that will pass without a roll.
    pub fn hold_count(&self) -> u32 {
        self.hold_count
    }

    /// The random source the core draws from.
    pub fn source(&self) -> &U {
        &self.source
    }

    /// Returns phase, suppression and hold count to their initial values.
    ///
    /// The random source keeps its position.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.suppressed = false;
        self.hold_count = 0;
    }
}
