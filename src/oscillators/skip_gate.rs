//! Sample-rate-bound gate oscillator with modulatable parameters.

use super::{GateCore, GateOutput, Oscillator};
use crate::config::GateConfig;
use crate::params::{GateParams, ParamRange};
use crate::random::{RngSource, UniformSource};
use crate::{AudioSignal, Param, Signal};

/// A probabilistic gate oscillator running at a fixed sample rate.
///
/// Each of the four parameters is a knob (a fixed value or any `Signal`)
/// plus an optional control voltage input. Every sample each knob and CV is
/// pulled once, summed with [`ParamRange::resolve`], clamped to the panel
/// range and handed to the underlying [`GateCore`].
///
/// `next_sample()` yields the gate voltage (0 or 10 V); the indicator level
/// of the same sample is available from [`light`](Self::light).
///
/// # Examples
///
/// ```
/// use bleedgate::{Signal, SkipGateOscillator};
///
/// // 4 Hz gate, 30% pulse width, half the cycles dropped, some bleed
/// let mut gate = SkipGateOscillator::new(4.0, 0.3, 0.5, 0.4, 48000.0);
/// let mut buffer = vec![0.0; 480];
/// gate.process(&mut buffer);
/// assert!(buffer.iter().all(|&v| v == 0.0 || v == 10.0));
/// ```
///
/// A control voltage sweeps the knob across its range, 10 V being the full
/// span:
///
/// ```
/// use bleedgate::SkipGateOscillator;
///
/// let mut gate = SkipGateOscillator::new(1.0, 0.5, 0.0, 0.0, 1000.0);
/// gate.set_gate_probability_cv(5.0);
/// gate.next_frame();
/// assert_eq!(gate.params().gate_probability, 0.5);
/// ```
pub struct SkipGateOscillator<U: UniformSource = RngSource> {
    core: GateCore<U>,
    frequency: ParamInput,
    pulse_width: ParamInput,
    gate_probability: ParamInput,
    bleed: ParamInput,
    sample_rate: f64,
    /// Parameters resolved on the most recent sample
    resolved: GateParams,
    light: f64,
}

/// A knob and its optional CV input.
struct ParamInput {
    knob: Param,
    /// Control voltage in volts
    cv: Option<Param>,
}

impl ParamInput {
    fn new(knob: impl Into<Param>) -> Self {
        Self {
            knob: knob.into(),
            cv: None,
        }
    }

    fn read(&mut self, range: ParamRange) -> f64 {
        let knob = self.knob.value();
        let cv = self.cv.as_mut().map_or(0.0, Param::value);
        range.resolve(knob, cv)
    }
}

impl SkipGateOscillator<RngSource> {
    /// Creates a gate oscillator seeded from operating system entropy.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cycles per second
    /// * `pulse_width` - Fraction of a passing cycle that is high
    /// * `gate_probability` - Chance that a rolled cycle is dropped
    /// * `bleed` - Scales how many cycles pass without a roll after a pass
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(
        frequency: impl Into<Param>,
        pulse_width: impl Into<Param>,
        gate_probability: impl Into<Param>,
        bleed: impl Into<Param>,
        sample_rate: f64,
    ) -> Self {
        Self::with_source(
            frequency,
            pulse_width,
            gate_probability,
            bleed,
            sample_rate,
            RngSource::from_entropy(),
        )
    }

    /// Builds an oscillator from fixed configuration values.
    ///
    /// A configured seed makes the output reproducible; without one the
    /// generator is seeded from entropy.
    pub fn from_config(config: &GateConfig) -> Self {
        let source = match config.seed {
            Some(seed) => RngSource::seed_from_u64(seed),
            None => RngSource::from_entropy(),
        };
        let params = config.params;
        log::debug!(
            "gate oscillator: {:?} at {} Hz (seed: {:?})",
            params,
            config.sample_rate,
            config.seed
        );
        Self::with_source(
            params.frequency,
            params.pulse_width,
            params.gate_probability,
            params.bleed,
            f64::from(config.sample_rate),
            source,
        )
    }
}

impl<U: UniformSource> SkipGateOscillator<U> {
    /// Creates a gate oscillator drawing its decisions from `source`.
    pub fn with_source(
        frequency: impl Into<Param>,
        pulse_width: impl Into<Param>,
        gate_probability: impl Into<Param>,
        bleed: impl Into<Param>,
        sample_rate: f64,
        source: U,
    ) -> Self {
        Self {
            core: GateCore::with_source(source),
            frequency: ParamInput::new(frequency),
            pulse_width: ParamInput::new(pulse_width),
            gate_probability: ParamInput::new(gate_probability),
            bleed: ParamInput::new(bleed),
            sample_rate,
            resolved: GateParams::default(),
            light: 0.0,
        }
    }

    /// Advances by one sample and returns the full output.
    pub fn next_frame(&mut self) -> GateOutput {
        self.resolved = GateParams::new(
            self.frequency.read(ParamRange::FREQUENCY),
            self.pulse_width.read(ParamRange::PULSE_WIDTH),
            self.gate_probability.read(ParamRange::GATE_PROBABILITY),
            self.bleed.read(ParamRange::BLEED),
        );

        let output = self.core.advance(self.resolved, self.sample_time());
        self.light = output.light;
        output
    }

    /// Indicator brightness of the most recent sample.
    pub fn light(&self) -> f64 {
        self.light
    }

    /// Parameters used on the most recent sample, after CV summing and clamping.
    pub fn params(&self) -> GateParams {
        self.resolved
    }

    /// The underlying gate core, for inspecting phase and hold state.
    pub fn core(&self) -> &GateCore<U> {
        &self.core
    }

    /// Replaces the pulse width knob.
    pub fn set_pulse_width(&mut self, pulse_width: impl Into<Param>) {
        self.pulse_width.knob = pulse_width.into();
    }

    /// Replaces the gate probability knob.
    pub fn set_gate_probability(&mut self, gate_probability: impl Into<Param>) {
        self.gate_probability.knob = gate_probability.into();
    }

    /// Replaces the bleed knob.
    pub fn set_bleed(&mut self, bleed: impl Into<Param>) {
        self.bleed.knob = bleed.into();
    }

    /// Connects a control voltage (in volts) to the frequency input.
    pub fn set_frequency_cv(&mut self, cv: impl Into<Param>) {
        self.frequency.cv = Some(cv.into());
    }

    /// Connects a control voltage (in volts) to the pulse width input.
    pub fn set_pulse_width_cv(&mut self, cv: impl Into<Param>) {
        self.pulse_width.cv = Some(cv.into());
    }

    /// Connects a control voltage (in volts) to the gate probability input.
    pub fn set_gate_probability_cv(&mut self, cv: impl Into<Param>) {
        self.gate_probability.cv = Some(cv.into());
    }

    /// Connects a control voltage (in volts) to the bleed input.
    pub fn set_bleed_cv(&mut self, cv: impl Into<Param>) {
        self.bleed.cv = Some(cv.into());
    }

    /// Disconnects every CV input, leaving the knobs alone.
    pub fn clear_cv(&mut self) {
        self.frequency.cv = None;
        self.pulse_width.cv = None;
        self.gate_probability.cv = None;
        self.bleed.cv = None;
    }
}

impl<U: UniformSource> Signal for SkipGateOscillator<U> {
    fn next_sample(&mut self) -> f64 {
        self.next_frame().voltage
    }
}

impl<U: UniformSource> AudioSignal for SkipGateOscillator<U> {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

impl<U: UniformSource> Oscillator for SkipGateOscillator<U> {
    fn set_frequency(&mut self, frequency: f64) {
        self.frequency.knob = Param::Fixed(frequency);
    }

    /// The frequency used on the most recent sample; before the first
    /// sample, the panel default.
    fn frequency(&self) -> f64 {
        self.resolved.frequency
    }

    fn reset(&mut self) {
        self.core.reset();
        self.light = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillators::{CycleDecision, GATE_HIGH_VOLTS};
    use crate::random::SequenceSource;

    /// Alternates between two values every sample.
    struct Toggle {
        values: [f64; 2],
        index: usize,
    }

    impl Signal for Toggle {
        fn next_sample(&mut self) -> f64 {
            self.index ^= 1;
            self.values[self.index]
        }
    }

    #[test]
    fn test_sample_rate() {
        let osc = SkipGateOscillator::new(1.0, 0.5, 0.0, 0.0, 44100.0);
        assert_eq!(osc.sample_rate(), 44100.0);
    }

    #[test]
    fn test_sample_values() {
        let mut osc = SkipGateOscillator::new(20.0, 0.5, 0.5, 0.5, 1000.0);
        for _ in 0..10000 {
            let sample = osc.next_sample();
            assert!(sample == 0.0 || sample == GATE_HIGH_VOLTS);
            assert_eq!(osc.light() * GATE_HIGH_VOLTS, sample);
        }
    }

    #[test]
    fn test_square_wave_without_gate() {
        let mut osc = SkipGateOscillator::new(2.0, 0.5, 0.0, 0.0, 1000.0);
        let mut buffer = vec![0.0; 1000];
        osc.process(&mut buffer);
        let high = buffer.iter().filter(|&&v| v == GATE_HIGH_VOLTS).count();
        assert_eq!(high, 500);
    }

    #[test]
    fn test_params_are_clamped() {
        let mut osc = SkipGateOscillator::with_source(
            500.0,
            1.5,
            -1.0,
            4.0,
            1000.0,
            SequenceSource::new([0.5]),
        );
        osc.next_frame();
        assert_eq!(osc.params(), GateParams::new(20.0, 0.99, 0.0, 1.0));
        assert_eq!(osc.frequency(), 20.0);
    }

    #[test]
    fn test_modulated_params_are_pulled_each_sample() {
        let pulse_width = Param::modulated(Toggle {
            values: [0.2, 0.8],
            index: 0,
        });
        let mut osc = SkipGateOscillator::with_source(
            1.0,
            pulse_width,
            0.0,
            0.0,
            1000.0,
            SequenceSource::default(),
        );
        osc.next_frame();
        let first = osc.params().pulse_width;
        osc.next_frame();
        let second = osc.params().pulse_width;
        assert_ne!(first, second);
        assert!([0.2, 0.8].contains(&first));
        assert!([0.2, 0.8].contains(&second));
    }

    #[test]
    fn test_cv_is_summed_into_knob() {
        let mut osc = SkipGateOscillator::with_source(
            1.0,
            0.5,
            0.25,
            0.0,
            1000.0,
            SequenceSource::default(),
        );
        osc.set_gate_probability_cv(5.0);
        osc.set_bleed_cv(2.5);
        osc.set_frequency_cv(-10.0);
        osc.next_frame();
        let params = osc.params();
        assert_eq!(params.gate_probability, 0.75);
        assert_eq!(params.bleed, 0.25);
        assert_eq!(params.frequency, 0.1);
        assert_eq!(params.pulse_width, 0.5);
    }

    #[test]
    fn test_cv_is_clamped_to_range() {
        let mut osc = SkipGateOscillator::new(1.0, 0.9, 0.0, 0.0, 1000.0);
        osc.set_pulse_width_cv(10.0);
        osc.next_frame();
        assert_eq!(osc.params().pulse_width, 0.99);
    }

    #[test]
    fn test_modulated_cv_is_pulled_each_sample() {
        let mut osc = SkipGateOscillator::new(1.0, 0.5, 0.5, 0.0, 1000.0);
        osc.set_gate_probability_cv(Param::modulated(Toggle {
            values: [-5.0, 5.0],
            index: 0,
        }));
        osc.next_frame();
        let first = osc.params().gate_probability;
        osc.next_frame();
        let second = osc.params().gate_probability;
        assert_eq!(first + second, 1.0);
        assert!([0.0, 1.0].contains(&first));
    }

    #[test]
    fn test_full_gate_cv_suppresses() {
        let mut osc = SkipGateOscillator::with_source(
            10.0,
            0.5,
            0.0,
            0.0,
            1000.0,
            SequenceSource::new([0.99]),
        );
        osc.set_gate_probability_cv(10.0);
        let decision = (0..200).find_map(|_| osc.next_frame().decision);
        assert_eq!(decision, Some(CycleDecision::Suppressed));
    }

    #[test]
    fn test_clear_cv_restores_knobs() {
        let mut osc = SkipGateOscillator::new(2.0, 0.5, 0.2, 0.0, 1000.0);
        osc.set_frequency_cv(3.0);
        osc.set_gate_probability_cv(3.0);
        osc.next_frame();
        assert_ne!(osc.params(), GateParams::new(2.0, 0.5, 0.2, 0.0));
        osc.clear_cv();
        osc.next_frame();
        assert_eq!(osc.params(), GateParams::new(2.0, 0.5, 0.2, 0.0));
    }

    #[test]
    fn test_set_frequency() {
        let mut osc = SkipGateOscillator::new(1.0, 0.5, 0.0, 0.0, 1000.0);
        osc.set_frequency(5.0);
        osc.next_sample();
        assert_eq!(osc.frequency(), 5.0);
    }

    #[test]
    fn test_setters_take_effect() {
        let mut osc = SkipGateOscillator::with_source(
            10.0,
            0.5,
            0.0,
            0.0,
            1000.0,
            SequenceSource::new([0.3]),
        );
        osc.set_gate_probability(1.0);
        osc.set_bleed(0.5);
        osc.set_pulse_width(0.25);
        osc.next_frame();
        assert_eq!(osc.params(), GateParams::new(10.0, 0.25, 1.0, 0.5));
        let decision = (0..200).find_map(|_| osc.next_frame().decision);
        assert_eq!(decision, Some(CycleDecision::Suppressed));
    }

    #[test]
    fn test_reset() {
        let mut osc = SkipGateOscillator::new(10.0, 0.5, 0.5, 0.5, 1000.0);
        for _ in 0..1234 {
            osc.next_sample();
        }
        osc.reset();
        assert_eq!(osc.core().phase(), 0.0);
        assert_eq!(osc.core().hold_count(), 0);
        assert!(!osc.core().is_suppressed());
        assert_eq!(osc.light(), 0.0);
        // first sample after a reset is always high
        assert_eq!(osc.next_sample(), GATE_HIGH_VOLTS);
    }

    #[test]
    fn test_from_config_is_reproducible() {
        let config = GateConfig {
            seed: Some(77),
            params: GateParams::new(15.0, 0.4, 0.5, 0.6),
            ..GateConfig::default()
        };
        let mut a = SkipGateOscillator::from_config(&config);
        let mut b = SkipGateOscillator::from_config(&config);
        let mut buffer_a = vec![0.0; 48000];
        let mut buffer_b = vec![0.0; 48000];
        a.process(&mut buffer_a);
        b.process(&mut buffer_b);
        assert_eq!(buffer_a, buffer_b);
        assert_eq!(a.sample_rate(), f64::from(config.sample_rate));
    }
}
