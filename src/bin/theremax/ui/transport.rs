//! Transport bar widget - shows instrument, loop position, and audio stats

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use theremax::InstrumentKind;

/// Snapshot of the sequencer for one frame
pub struct TransportInfo {
    pub selected: InstrumentKind,
    pub tracks: usize,
    /// Note resolution of the recording track, if any
    pub intervals: Option<u32>,
    pub elapsed_ms: u32,
    pub loop_length_ms: u32,
    pub progress: f64,
    pub sample_rate: f32,
}

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    info: &TransportInfo,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" theremax ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let (state_symbol, state_colour) = match (info.tracks, info.intervals) {
        (0, _) => ("○ Empty", Color::DarkGray),
        (_, Some(_)) => ("● Recording", Color::Red),
        _ => ("▶ Looping", Color::Green),
    };
    let resolution = match info.intervals {
        Some(n) => format!("{} steps  ", n),
        None => String::new(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", state_symbol),
            Style::default().fg(state_colour),
        ),
        Span::styled(
            format!("Instrument: {}  ", info.selected),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(resolution, Style::default().fg(Color::White)),
        Span::styled(
            format!("Tracks: {}  ", info.tracks),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz  ", info.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(info.progress.clamp(0.0, 1.0))
        .label(format!(
            "{:.1}s / {:.1}s",
            info.elapsed_ms.min(info.loop_length_ms) as f64 / 1000.0,
            info.loop_length_ms as f64 / 1000.0
        ));
    frame.render_widget(gauge, rows[1]);
}
