//! Signal processing types and traits.
//!
//! This module provides the signal abstractions the gate oscillator is built on:
//! - `Signal` trait for anything that produces samples
//! - `AudioSignal` trait for signals running at a known sample rate
//! - `Param` type for fixed or modulated parameters

mod audio;
mod core;

pub use audio::AudioSignal;
pub use self::core::{Param, Signal};
