mod common;

use anyhow::Result;
use bleedgate::{GateParams, Oscillator, ParamRange, SkipGateOscillator};
use common::{DemoAudioState, KeyAction, is_quit_key, run_interactive_demo};
use crossterm::{
    ExecutableCommand,
    cursor::MoveTo,
    event::{KeyCode, KeyEventKind},
    terminal::{Clear, ClearType},
};
use std::f64::consts::TAU;
use std::io::{Write, stdout};
use std::sync::{Arc, Mutex};

/// Pitch of the tone the gate chops, in Hz
const TONE_HZ: f64 = 220.0;
const VOLUME: f64 = 0.3;

struct GateDemo {
    params: GateParams,
    gate: Option<SkipGateOscillator>,
    tone_phase: f64,
    tone_increment: f64,
}

impl GateDemo {
    fn new() -> Self {
        Self {
            params: GateParams::new(4.0, 0.5, 0.3, 0.0),
            gate: None,
            tone_phase: 0.0,
            tone_increment: 0.0,
        }
    }

    fn nudge(&mut self, range: ParamRange, delta: f64) {
        let params = &mut self.params;
        let field = match range.name {
            "frequency" => &mut params.frequency,
            "pulse_width" => &mut params.pulse_width,
            "gate_probability" => &mut params.gate_probability,
            _ => &mut params.bleed,
        };
        *field = range.clamp(*field + delta);

        if let Some(gate) = self.gate.as_mut() {
            gate.set_frequency(params.frequency);
            gate.set_pulse_width(params.pulse_width);
            gate.set_gate_probability(params.gate_probability);
            gate.set_bleed(params.bleed);
        }
    }
}

impl DemoAudioState for GateDemo {
    fn prepare(&mut self, sample_rate: f64) {
        let p = self.params;
        self.gate = Some(SkipGateOscillator::new(
            p.frequency,
            p.pulse_width,
            p.gate_probability,
            p.bleed,
            sample_rate,
        ));
        self.tone_increment = TONE_HZ / sample_rate;
    }

    fn next_sample(&mut self) -> f64 {
        let Some(gate) = self.gate.as_mut() else {
            return 0.0;
        };
        let open = gate.next_frame().light;
        let tone = (self.tone_phase * TAU).sin();
        self.tone_phase = (self.tone_phase + self.tone_increment).fract();
        tone * open * VOLUME
    }
}

fn draw(state: &Arc<Mutex<GateDemo>>) -> Result<()> {
    let params = state
        .lock()
        .map_err(|_| anyhow::anyhow!("audio state poisoned"))?
        .params;
    let mut out = stdout();
    out.execute(Clear(ClearType::All))?;
    out.execute(MoveTo(0, 0))?;
    write!(
        out,
        "Skip gate demo\r\n\r\n\
         speed        {:>6.2} Hz   [f/F]\r\n\
         pulse width  {:>6.2}      [w/W]\r\n\
         gate         {:>6.2}      [g/G]\r\n\
         bleed        {:>6.2}      [b/B]\r\n\r\n\
         q to quit\r\n",
        params.frequency, params.pulse_width, params.gate_probability, params.bleed
    )?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    run_interactive_demo(GateDemo::new(), draw, |state, key_event| {
        if key_event.kind != KeyEventKind::Press {
            return Ok(KeyAction::Continue);
        }
        if is_quit_key(key_event.code) {
            return Ok(KeyAction::Exit);
        }

        let change = match key_event.code {
            KeyCode::Char('f') => Some((ParamRange::FREQUENCY, -0.5)),
            KeyCode::Char('F') => Some((ParamRange::FREQUENCY, 0.5)),
            KeyCode::Char('w') => Some((ParamRange::PULSE_WIDTH, -0.05)),
            KeyCode::Char('W') => Some((ParamRange::PULSE_WIDTH, 0.05)),
            KeyCode::Char('g') => Some((ParamRange::GATE_PROBABILITY, -0.05)),
            KeyCode::Char('G') => Some((ParamRange::GATE_PROBABILITY, 0.05)),
            KeyCode::Char('b') => Some((ParamRange::BLEED, -0.05)),
            KeyCode::Char('B') => Some((ParamRange::BLEED, 0.05)),
            _ => None,
        };
        if let Some((range, delta)) = change {
            state
                .lock()
                .map_err(|_| anyhow::anyhow!("audio state poisoned"))?
                .nudge(range, delta);
            draw(state)?;
        }
        Ok(KeyAction::Continue)
    })
}
