//! Core signal processing trait and parameter types.
//!
//! This module provides the fundamental `Signal` trait that represents
//! anything that can generate samples, as well as the `Param` type for
//! parameters that can be either fixed or modulated.

/// Common interface for all signal sources.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A constant signal: always yields the same value.
///
/// ```
/// use bleedgate::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

/// A parameter that can be either a fixed value or modulated by a signal.
///
/// Knob positions map to `Param::Fixed`; an external control voltage or an
/// LFO maps to `Param::Signal`. The boxed signal is allocated once when the
/// parameter is built, so reading the value per sample never allocates.
///
/// # Examples
///
/// ```
/// use bleedgate::Param;
///
/// let mut fixed: Param = 0.5.into();
/// assert_eq!(fixed.value(), 0.5);
/// assert!(fixed.is_fixed());
/// ```
pub enum Param {
    /// A fixed, constant value
    Fixed(f64),
    /// A value modulated by a signal source
    Signal(Box<dyn Signal + Send>),
}

impl Param {
    /// Gets the current value of the parameter.
    ///
    /// For modulated parameters this advances the signal by one sample.
    pub fn value(&mut self) -> f64 {
        match self {
            Param::Fixed(v) => *v,
            Param::Signal(s) => s.next_sample(),
        }
    }

    /// Creates a fixed parameter with the given value.
    pub fn fixed(value: f64) -> Self {
        Param::Fixed(value)
    }

    /// Creates a parameter controlled by a signal source.
    pub fn modulated(signal: impl Signal + Send + 'static) -> Self {
        Param::Signal(Box::new(signal))
    }

    /// Returns true if this parameter is fixed (non-modulated).
    pub fn is_fixed(&self) -> bool {
        matches!(self, Param::Fixed(_))
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Fixed(value)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Param::Signal(_) => f.write_str("Signal(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp(f64);

    impl Signal for Ramp {
        fn next_sample(&mut self) -> f64 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn test_f64_to_param() {
        let param: Param = 0.5.into();
        match param {
            Param::Fixed(v) => assert_eq!(v, 0.5),
            Param::Signal(_) => panic!("Expected Fixed, got Signal"),
        }
    }

    #[test]
    fn test_modulated_param_advances() {
        let mut param = Param::modulated(Ramp(0.0));
        assert!(!param.is_fixed());
        assert_eq!(param.value(), 1.0);
        assert_eq!(param.value(), 2.0);
    }

    #[test]
    fn test_default_process_fills_buffer() {
        let mut ramp = Ramp(0.0);
        let mut buffer = [0.0; 3];
        ramp.process(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0]);
    }
}
