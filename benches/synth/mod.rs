//! Benchmarks for voice rendering on the audio thread.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use theremax::synth::{voice_channel, Voice, VoiceBank, VoiceMessage};
use theremax::Timbre;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Plain, AM, FM and detuned paths
        for timbre in [Timbre::Mono, Timbre::Am, Timbre::Fm, Timbre::Duo] {
            let mut voice = Voice::new(SAMPLE_RATE);
            let patch = timbre.patch().with_hold(f32::MAX);
            voice.start(0, 220.0, 0.5, patch, 0);

            group.bench_with_input(BenchmarkId::new(timbre.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.fill(0.0);
                    voice.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}

pub fn bench_voice_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/bank");
    let voices = 16u32;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let (mut tx, rx) = voice_channel(256);
        let mut bank = VoiceBank::new(SAMPLE_RATE, voices as usize, rx);

        // Every voice retuned each block, as during a busy multi-track loop
        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                for key in 0..voices {
                    let timbre = Timbre::ALL[key as usize % Timbre::ALL.len()];
                    let _ = tx.push(VoiceMessage::NoteOn {
                        key,
                        frequency: 110.0 * (1.0 + key as f32 * 0.25),
                        gain: 0.3,
                        patch: timbre.patch(),
                    });
                }
                bank.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
