//! Bleedgate - a probabilistic skip-gate oscillator
//!
//! A square-wave gate whose cycles are randomly dropped. Once a cycle passes,
//! the "bleed" amount can hold the gate open for a random run of further
//! cycles before the probability is rolled again.

pub mod config;
pub mod error;
pub mod oscillators;
pub mod params;
pub mod random;
#[cfg(feature = "render")]
pub mod render;
pub mod signals;

// Re-export commonly used types at the crate root
pub use config::GateConfig;
pub use error::{Error, Result};
pub use oscillators::{
    CycleDecision, GATE_HIGH_VOLTS, GateCore, GateOutput, Oscillator, SkipGateOscillator,
};
pub use params::{GateParams, ParamRange};
pub use random::{RngSource, SequenceSource, UniformSource};
pub use signals::{AudioSignal, Param, Signal};
