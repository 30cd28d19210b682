//! App - audio output setup and UI launch

use std::io::stdout;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{error, info};
use rtrb::RingBuffer;

use theremax::{
    synth::{voice_channel, VoiceBank},
    Dimensions, InstrumentKind, InstrumentRack, LineCanvas, Theremax, TheremaxConfig,
    MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Pending voice messages between UI and audio thread
const VOICE_QUEUE_SIZE: usize = 1024;
/// Samples buffered for the scope view
const SCOPE_QUEUE_SIZE: usize = 8192;

pub struct App {
    config: TheremaxConfig,
    instrument: InstrumentKind,
    voices: usize,
}

impl App {
    pub fn new(config: TheremaxConfig, instrument: InstrumentKind, voices: usize) -> Self {
        Self {
            config,
            instrument,
            voices,
        }
    }

    /// Open the audio device and run the UI until the user quits
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        info!(
            "audio out: {} Hz, {} channels, {} voices",
            sample_rate, channels, self.voices
        );

        let (voice_tx, voice_rx) = voice_channel(VOICE_QUEUE_SIZE);
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);

        let mut bank = VoiceBank::new(sample_rate, self.voices, voice_rx);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    bank.render_block(block);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // Scope is best effort, drop samples when the UI lags
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| error!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        let engine = Theremax::new(self.config, LineCanvas::new(Dimensions::default()));
        let rack = InstrumentRack::new(voice_tx);
        let mut ui = UiApp::new(engine, rack, self.instrument, scope_rx, sample_rate);

        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;
        let result = ui.run(&mut terminal);
        // Restore the terminal even if the UI failed
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        drop(stream);
        result
    }
}
