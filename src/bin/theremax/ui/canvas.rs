//! Gesture canvas widget - one coloured line per replaying track

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line, Points},
        Block, Borders,
    },
    Frame,
};

use theremax::LineCanvas;

/// Render the recorded lines and return the drawable area inside the border.
pub fn render_canvas(frame: &mut Frame, area: Rect, lines: &LineCanvas) -> Rect {
    let block = Block::default()
        .title(" Draw to play ")
        .borders(Borders::ALL);
    let inner = block.inner(area);

    let width = inner.width as f64;
    let height = inner.height as f64;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for (track, points) in lines.lines() {
                let rgb = LineCanvas::colour(track);
                let color = Color::Rgb(rgb.0, rgb.1, rgb.2);

                // Terminal rows grow downwards, canvas y grows upwards
                match points {
                    [single] => ctx.draw(&Points {
                        coords: &[(single.x, height - single.y)],
                        color,
                    }),
                    _ => {
                        for pair in points.windows(2) {
                            ctx.draw(&Line::new(
                                pair[0].x,
                                height - pair[0].y,
                                pair[1].x,
                                height - pair[1].y,
                                color,
                            ));
                        }
                    }
                }
            }
        });

    frame.render_widget(canvas, area);
    inner
}
