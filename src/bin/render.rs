//! Renders a probabilistic gate to a WAV file.

use std::path::PathBuf;

use anyhow::Context;
use bleedgate::{GateConfig, SkipGateOscillator, render};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Render a probabilistic skip-gate oscillator to WAV")]
struct Args {
    /// TOML configuration file; the embedded defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output WAV file
    #[arg(short, long, default_value = "gate.wav")]
    output: PathBuf,

    /// Render length in seconds
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Cycles per second (0.1 to 20)
    #[arg(short, long)]
    frequency: Option<f64>,

    /// Fraction of a passing cycle that is high (0.01 to 0.99)
    #[arg(short, long)]
    pulse_width: Option<f64>,

    /// Probability that a rolled cycle is dropped (0 to 1)
    #[arg(short, long)]
    gate: Option<f64>,

    /// Scales runs of cycles that pass without a roll (0 to 1)
    #[arg(short, long)]
    bleed: Option<f64>,
}

impl Args {
    fn apply(&self, config: &mut GateConfig) {
        if let Some(seconds) = self.seconds {
            config.duration_secs = seconds;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(frequency) = self.frequency {
            config.params.frequency = frequency;
        }
        if let Some(pulse_width) = self.pulse_width {
            config.params.pulse_width = pulse_width;
        }
        if let Some(gate) = self.gate {
            config.params.gate_probability = gate;
        }
        if let Some(bleed) = self.bleed {
            config.params.bleed = bleed;
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GateConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => GateConfig::embedded()?,
    };
    args.apply(&mut config);
    config.validate().context("invalid settings")?;

    let mut osc = SkipGateOscillator::from_config(&config);
    let stats = render::render_to_wav(&mut osc, config.duration_secs, &args.output)
        .with_context(|| format!("failed to render {}", args.output.display()))?;

    println!(
        "{}: {} samples, {} cycles, {:.1}% suppressed, {} held",
        args.output.display(),
        stats.samples,
        stats.cycles,
        stats.suppressed_ratio() * 100.0,
        stats.held_cycles
    );
    Ok(())
}
