//! Gate oscillators.
//!
//! `GateCore` is the per-sample state machine; `SkipGateOscillator` drives it
//! from `Param` sources at a fixed sample rate.

mod gate_core;
mod skip_gate;
mod traits;

pub use gate_core::{CycleDecision, GATE_HIGH_VOLTS, GateCore, GateOutput};
pub use skip_gate::SkipGateOscillator;
pub use traits::Oscillator;
