//! TUI module for theremax
//!
//! Mouse drags on the canvas are gestures. The sequencer is ticked once per
//! frame and its lines are drawn back onto the same canvas.

mod canvas;
mod transport;
mod waveform;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use theremax::{
    Dimensions, InstrumentKind, InstrumentRack, LineCanvas, Point, PointerId, SequencerError,
    Theremax, TrackId,
};

use canvas::render_canvas;
use transport::{render_transport, AudioStats, TransportInfo};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// A terminal has a single mouse pointer
const MOUSE: PointerId = 0;

/// UI application state
pub struct UiApp {
    engine: Theremax<LineCanvas>,
    rack: InstrumentRack,
    /// Instrument handed to the next gesture
    selected: InstrumentKind,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    sample_rate: f32,
    /// Canvas area of the last frame, inside its border
    canvas_area: Rect,
    /// Left button went down on the canvas and has not been released
    gesture_open: bool,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        engine: Theremax<LineCanvas>,
        rack: InstrumentRack,
        selected: InstrumentKind,
        audio_rx: Consumer<f32>,
        sample_rate: f32,
    ) -> Self {
        Self {
            engine,
            rack,
            selected,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            sample_rate,
            canvas_area: Rect::default(),
            gesture_open: false,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.engine.tick();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps; drain everything that queued up meanwhile
            let mut timeout = Duration::from_millis(16);
            while event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code)
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
                timeout = Duration::ZERO;
            }
        }

        self.engine.reset();
        self.rack.all_notes_off();
        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }

        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.engine.reset();
                self.rack.all_notes_off();
                self.gesture_open = false;
                info!("loop cleared");
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(&kind) = InstrumentKind::ALL.get(index) {
                    self.selected = kind;
                    info!("instrument {}", kind);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(point) = self.canvas_point(mouse.column, mouse.row) else {
            // Leaving the canvas ends the gesture
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                self.end_gesture();
            }
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.begin_gesture(point),
            MouseEventKind::Drag(MouseButton::Left) => {
                match self.engine.continue_track(point.x, point.y, MOUSE) {
                    Ok(()) => {}
                    // Sealed by a loop wrap mid-drag: keep drawing on a new track
                    Err(SequencerError::NoActiveTrack { .. }) => self.begin_gesture(point),
                    Err(err) => warn!("gesture sample dropped: {}", err),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.end_gesture();
            }
            _ => {}
        }
    }

    fn begin_gesture(&mut self, point: Point) {
        let instrument = self.rack.build(self.selected);
        self.engine.begin_track(point.x, point.y, MOUSE, instrument);
        self.gesture_open = true;
    }

    /// Seal the mouse track. `None` if no gesture was open or a loop wrap
    /// already sealed it.
    fn end_gesture(&mut self) -> Option<TrackId> {
        if !std::mem::take(&mut self.gesture_open) {
            return None;
        }
        match self.engine.end_track(MOUSE) {
            Ok(id) => Some(id),
            Err(SequencerError::NoActiveTrack { .. }) => {
                debug!("gesture already sealed by the loop wrap");
                None
            }
            Err(err) => {
                warn!("gesture end failed: {}", err);
                None
            }
        }
    }

    /// Map a terminal cell to canvas coordinates, `None` outside the canvas.
    fn canvas_point(&self, column: u16, row: u16) -> Option<Point> {
        if !self.canvas_area.contains(Position::new(column, row)) {
            return None;
        }
        Some(Point::new(
            (column - self.canvas_area.x) as f64,
            (row - self.canvas_area.y) as f64,
        ))
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Transport and loop progress
                Constraint::Min(8),    // Gesture canvas
                Constraint::Length(6), // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let info = TransportInfo {
            selected: self.selected,
            tracks: self.engine.len(),
            intervals: self.engine.intervals(),
            elapsed_ms: self.engine.elapsed_ms(),
            loop_length_ms: self.engine.loop_length_ms(),
            progress: self.engine.loop_progress(),
            sample_rate: self.sample_rate,
        };
        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], &info, &stats);

        let inner = render_canvas(frame, chunks[1], self.engine.visualization());
        if inner != self.canvas_area {
            self.canvas_area = inner;
            self.engine
                .visualization_mut()
                .resize(Dimensions::new(inner.width as f64, inner.height as f64));
        }

        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(" [Drag] Record  [1-9] Instrument  [R] Reset  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rtrb::RingBuffer;
    use theremax::synth::voice_channel;
    use theremax::TheremaxConfig;

    fn app(loop_ms: u32) -> UiApp {
        let (tx, _rx) = voice_channel(64);
        let (_scope_tx, scope_rx) = RingBuffer::<f32>::new(16);
        let engine = Theremax::new(
            TheremaxConfig::new().loop_length_millis(loop_ms),
            LineCanvas::new(Dimensions::new(80.0, 20.0)),
        );
        let mut app = UiApp::new(
            engine,
            InstrumentRack::new(tx),
            InstrumentKind::Theremin,
            scope_rx,
            48_000.0,
        );
        app.canvas_area = Rect::new(0, 0, 80, 20);
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_and_release_records_one_track() {
        let mut app = app(10_000);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 6));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 6));

        assert_eq!(app.engine.len(), 1);
        assert!(!app.engine.tracks()[0].is_recording());
        assert_eq!(app.engine.tracks()[0].len(), 2);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut app = app(10_000);
        assert_eq!(app.end_gesture(), None);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5));
        assert!(app.engine.is_empty());
    }

    #[test]
    fn release_after_wrap_seal_ends_quietly() {
        let mut app = app(1);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        std::thread::sleep(Duration::from_millis(5));
        assert!(app.engine.tick().looped);

        assert_eq!(app.end_gesture(), None);
        assert!(!app.gesture_open);
        assert!(!app.engine.tracks()[0].is_recording());
    }
}
