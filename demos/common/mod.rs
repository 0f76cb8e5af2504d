//! Audio device and terminal plumbing for the interactive demos.

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Audio state that produces one mono sample per frame.
pub trait DemoAudioState: Send + 'static {
    /// Called once with the device sample rate before the stream starts.
    fn prepare(&mut self, sample_rate: f64);

    fn next_sample(&mut self) -> f64;
}

/// Whether the event loop keeps running.
pub enum KeyAction {
    Continue,
    Exit,
}

/// Runs an interactive demo: opens the default output device, switches the
/// terminal to raw mode and feeds key presses to `key_handler` until it
/// returns `KeyAction::Exit`.
pub fn run_interactive_demo<S, F, K>(state: S, initial_ui: F, key_handler: K) -> Result<()>
where
    S: DemoAudioState,
    F: FnOnce(&Arc<Mutex<S>>) -> Result<()>,
    K: Fn(&Arc<Mutex<S>>, &KeyEvent) -> Result<KeyAction>,
{
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device available"))?;

    let config = device.default_output_config()?;
    let mut state = state;
    state.prepare(config.sample_rate().0 as f64);
    let state = Arc::new(Mutex::new(state));

    let _stream = match config.sample_format() {
        SampleFormat::F32 => create_audio_stream::<f32, S>(&device, &config.into(), state.clone())?,
        SampleFormat::I16 => create_audio_stream::<i16, S>(&device, &config.into(), state.clone())?,
        SampleFormat::U16 => create_audio_stream::<u16, S>(&device, &config.into(), state.clone())?,
        sample_format => {
            return Err(anyhow::anyhow!(
                "Unsupported sample format: {}",
                sample_format
            ));
        }
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    initial_ui(&state)?;

    loop {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key_event) = event::read()? {
            match key_handler(&state, &key_event)? {
                KeyAction::Continue => {}
                KeyAction::Exit => break,
            }
        }
    }

    cleanup_terminal();
    Ok(())
}

fn create_audio_stream<T, S>(
    device: &cpal::Device,
    config: &StreamConfig,
    state: Arc<Mutex<S>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
    S: DemoAudioState,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut state) = state.lock() else {
                return;
            };
            for frame in data.chunks_mut(channels) {
                let value: T = T::from_sample(state.next_sample());
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
