//! Benchmarks for the sequencer's per-frame work.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use theremax::{
    Dimensions, Instrument, LineCanvas, ManualClock, ManualTime, PlayError, Theremax,
    TheremaxConfig,
};

/// One UI frame at ~60fps
const FRAME_MS: u32 = 16;

struct Mute;

impl Instrument for Mute {
    fn play(&mut self, pitch: f64, volume_db: f64) -> Result<(), PlayError> {
        black_box((pitch, volume_db));
        Ok(())
    }

    fn stop(&mut self) {}

    fn intervals(&self) -> u32 {
        24
    }
}

/// Sequencer holding `tracks` recorded 5 second gestures, sampled every 10ms.
fn recorded(tracks: u32) -> (Theremax<LineCanvas, ManualClock>, ManualTime) {
    let time = ManualTime::new();
    let mut engine = Theremax::with_clock(
        TheremaxConfig::new().loop_length_millis(10_000),
        LineCanvas::new(Dimensions::new(800.0, 600.0)),
        ManualClock::new(time.clone()),
    );

    for pointer in 0..tracks {
        engine.begin_track(0.0, 300.0, pointer, Box::new(Mute));
    }
    for step in 1..=500u32 {
        time.advance_ms(10);
        for pointer in 0..tracks {
            let x = (step + pointer * 7) as f64 % 800.0;
            let y = 300.0 + (step as f64 * 0.05).sin() * 200.0;
            let _ = engine.continue_track(x, y, pointer);
        }
    }
    for pointer in 0..tracks {
        let _ = engine.end_track(pointer);
    }

    (engine, time)
}

pub fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/tick");

    for tracks in [1u32, 8, 64] {
        let (mut engine, time) = recorded(tracks);

        group.bench_with_input(BenchmarkId::new("replay", tracks), &tracks, |b, _| {
            b.iter(|| {
                time.advance_ms(FRAME_MS);
                black_box(engine.tick());
            })
        });
    }

    group.finish();
}

pub fn bench_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/recording");

    // Appending to an open gesture while replaying 8 finished tracks
    let (mut engine, time) = recorded(8);
    engine.begin_track(400.0, 300.0, 99, Box::new(Mute));
    let mut x = 400.0;

    group.bench_function("continue_and_tick", |b| {
        b.iter(|| {
            time.advance_ms(FRAME_MS);
            x = (x + 1.0) % 800.0;
            if engine.continue_track(black_box(x), 300.0, 99).is_err() {
                // Sealed by a loop wrap
                engine.begin_track(x, 300.0, 99, Box::new(Mute));
            }
            black_box(engine.tick());
        })
    });

    group.finish();
}
