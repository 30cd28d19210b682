use theremax::{
    synth::{voice_channel, VoiceBank},
    Dimensions, InstrumentKind, InstrumentRack, LineCanvas, ManualClock, ManualTime, Theremax,
    TheremaxConfig, Timbre,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 512;

fn render(bank: &mut VoiceBank, blocks: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(blocks * BLOCK);
    let mut block = [0.0f32; BLOCK];
    for _ in 0..blocks {
        bank.render_block(&mut block);
        out.extend_from_slice(&block);
    }
    out
}

fn gesture_through(kind: InstrumentKind) -> Vec<f32> {
    let (tx, rx) = voice_channel(64);
    let mut rack = InstrumentRack::new(tx);
    let mut bank = VoiceBank::new(SAMPLE_RATE, 8, rx);

    let time = ManualTime::new();
    let mut engine = Theremax::with_clock(
        TheremaxConfig::new().loop_length_millis(2_000),
        LineCanvas::new(Dimensions::new(200.0, 100.0)),
        ManualClock::new(time.clone()),
    );

    engine.begin_track(100.0, 90.0, 0, rack.build(kind));
    time.advance_ms(10);
    engine.tick();

    render(&mut bank, 8)
}

#[test]
fn theremin_gesture_is_audible_and_bounded() {
    let samples = gesture_through(InstrumentKind::Theremin);
    assert!(samples.iter().any(|s| s.abs() > 1e-3));
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn every_timbre_is_audible_and_bounded() {
    for timbre in Timbre::ALL {
        let samples = gesture_through(InstrumentKind::Synth(timbre));
        assert!(
            samples.iter().any(|s| s.abs() > 1e-3),
            "{} rendered silence",
            timbre.name()
        );
        assert!(
            samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0),
            "{} clipped",
            timbre.name()
        );
    }
}

#[test]
fn empty_bank_renders_silence() {
    let (_tx, rx) = voice_channel(4);
    let mut bank = VoiceBank::new(SAMPLE_RATE, 4, rx);
    assert!(render(&mut bank, 4).iter().all(|&s| s == 0.0));
}

#[test]
fn reset_fades_every_voice_out() {
    let (tx, rx) = voice_channel(64);
    let mut rack = InstrumentRack::new(tx);
    let mut bank = VoiceBank::new(SAMPLE_RATE, 8, rx);

    let time = ManualTime::new();
    let mut engine = Theremax::with_clock(
        TheremaxConfig::new().loop_length_millis(2_000),
        LineCanvas::new(Dimensions::new(100.0, 100.0)),
        ManualClock::new(time.clone()),
    );
    engine.begin_track(30.0, 80.0, 0, rack.build(InstrumentKind::Theremin));
    engine.begin_track(70.0, 80.0, 1, rack.build(InstrumentKind::Synth(Timbre::Basic)));
    time.advance_ms(5);
    engine.tick();
    render(&mut bank, 4);
    assert_eq!(bank.active_voices(), 2);

    engine.reset();
    // Two seconds outlast every release
    let tail = render(&mut bank, 2 * SAMPLE_RATE as usize / BLOCK);

    assert_eq!(bank.active_voices(), 0);
    assert!(tail[tail.len() - BLOCK..].iter().all(|&s| s == 0.0));
}
