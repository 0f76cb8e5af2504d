//! Offline rendering of a gate oscillator to statistics or a WAV file.

use std::path::Path;

use crate::error::Result;
use crate::oscillators::{CycleDecision, GATE_HIGH_VOLTS, SkipGateOscillator};
use crate::random::UniformSource;
use crate::AudioSignal;

/// Samples between progress log lines.
const PROGRESS_INTERVAL: u64 = 1 << 20;

/// Counts gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Samples rendered
    pub samples: u64,
    /// Samples where the gate was high
    pub high_samples: u64,
    /// Cycle boundaries crossed
    pub cycles: u64,
    /// Boundaries rolled and suppressed
    pub suppressed_cycles: u64,
    /// Boundaries forced open by the hold counter
    pub held_cycles: u64,
}

impl RenderStats {
    fn record(&mut self, high: bool, decision: Option<CycleDecision>) {
        self.samples += 1;
        if high {
            self.high_samples += 1;
        }
        if let Some(decision) = decision {
            self.cycles += 1;
            match decision {
                CycleDecision::Suppressed => self.suppressed_cycles += 1,
                CycleDecision::Held { .. } => self.held_cycles += 1,
                CycleDecision::Passed { .. } => {}
            }
        }
    }

    /// Fraction of boundaries that were suppressed, or `0.0` before any boundary.
    pub fn suppressed_ratio(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.suppressed_cycles as f64 / self.cycles as f64
        }
    }
}

/// Runs `osc` for `frames` samples and collects statistics.
pub fn render_frames<U: UniformSource>(
    osc: &mut SkipGateOscillator<U>,
    frames: u64,
) -> RenderStats {
    let mut stats = RenderStats::default();
    for _ in 0..frames {
        let output = osc.next_frame();
        stats.record(output.is_high(), output.decision);
    }
    stats
}

/// Renders `seconds` of `osc` to a mono 32-bit float WAV file.
///
/// The gate voltage is written scaled to full scale, so a high gate is
/// `1.0` and a low gate `0.0`.
pub fn render_to_wav<U: UniformSource>(
    osc: &mut SkipGateOscillator<U>,
    seconds: f64,
    path: impl AsRef<Path>,
) -> Result<RenderStats> {
    let path = path.as_ref();
    let sample_rate = osc.sample_rate();
    let frames = (seconds * sample_rate).round() as u64;
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    log::info!("rendering {frames} samples to {}", path.display());
    let mut writer = hound::WavWriter::create(path, spec)?;
    let mut stats = RenderStats::default();
    for frame in 0..frames {
        let output = osc.next_frame();
        writer.write_sample((output.voltage / GATE_HIGH_VOLTS) as f32)?;
        stats.record(output.is_high(), output.decision);
        if frame > 0 && frame % PROGRESS_INTERVAL == 0 {
            log::info!("{frame}/{frames} samples");
        }
    }
    writer.finalize()?;

    log::info!(
        "rendered {} samples, {} cycles ({} suppressed, {} held)",
        stats.samples,
        stats.cycles,
        stats.suppressed_cycles,
        stats.held_cycles
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[test]
    fn test_render_frames_square() {
        let mut osc = SkipGateOscillator::new(2.0, 0.5, 0.0, 0.0, 1000.0);
        let stats = render_frames(&mut osc, 1000);
        assert_eq!(stats.samples, 1000);
        assert_eq!(stats.high_samples, 500);
        assert_eq!(stats.cycles, 2);
        assert_eq!(stats.suppressed_cycles, 0);
        assert_eq!(stats.held_cycles, 0);
    }

    #[test]
    fn test_render_frames_counts_decisions() {
        // pass arming 2 holds, two holds, then suppressed
        let source = SequenceSource::new([0.9, 0.25, 0.1, 0.9, 0.0]);
        let mut osc = SkipGateOscillator::with_source(10.0, 0.5, 0.5, 1.0, 1000.0, source);
        let stats = render_frames(&mut osc, 400);
        assert_eq!(stats.cycles, 4);
        assert_eq!(stats.held_cycles, 2);
        assert_eq!(stats.suppressed_cycles, 1);
        assert_eq!(stats.suppressed_ratio(), 0.25);
    }

    #[test]
    fn test_empty_stats_ratio() {
        assert_eq!(RenderStats::default().suppressed_ratio(), 0.0);
    }

    #[test]
    fn test_render_to_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gate.wav");
        let mut osc = SkipGateOscillator::new(5.0, 0.5, 0.0, 0.0, 8000.0);
        let stats = render_to_wav(&mut osc, 0.5, &path).unwrap();
        assert_eq!(stats.samples, 4000);

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4000);
        assert!(samples.iter().all(|&s| s == 0.0 || s == 1.0));
        let high = samples.iter().filter(|&&s| s == 1.0).count() as u64;
        assert_eq!(high, stats.high_samples);
    }
}
