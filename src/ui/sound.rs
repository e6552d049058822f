/// Sound effects: short procedural chiptune cues via rodio.
///
/// Every cue is synthesised once at start-up into an in-memory WAV buffer
/// and played fire-and-forget on its own detached sink.
///
/// Build without the "sound" feature to drop audio entirely; the stub
/// `SoundEngine` below then does nothing.

use crate::sim::event::GameEvent;

/// One cue per audible moment of the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Sfx {
    Start,
    Eat,
    GameOver,
    BoardCleared,
    Pause,
    Resume,
    Blip,
    Error,
}

impl Sfx {
    #[cfg_attr(not(feature = "sound"), allow(dead_code))]
    pub const ALL: [Sfx; 8] = [
        Sfx::Start,
        Sfx::Eat,
        Sfx::GameOver,
        Sfx::BoardCleared,
        Sfx::Pause,
        Sfx::Resume,
        Sfx::Blip,
        Sfx::Error,
    ];

    /// Which cue, if any, an event deserves.
    pub fn for_event(event: &GameEvent) -> Option<Sfx> {
        match event {
            GameEvent::GameStarted | GameEvent::Restored => Some(Sfx::Start),
            GameEvent::FoodEaten { .. } => Some(Sfx::Eat),
            GameEvent::GameOver { .. } => Some(Sfx::GameOver),
            GameEvent::BoardFilled { .. } => Some(Sfx::BoardCleared),
            GameEvent::Paused => Some(Sfx::Pause),
            GameEvent::Resumed => Some(Sfx::Resume),
            GameEvent::MenuMoved | GameEvent::SettingChanged | GameEvent::Saved => Some(Sfx::Blip),
            GameEvent::SaveFailed | GameEvent::NothingToRestore => Some(Sfx::Error),
            GameEvent::ExitRequested => None,
        }
    }

    /// Notes as (frequency Hz, seconds).
    #[cfg_attr(not(feature = "sound"), allow(dead_code))]
    fn notes(self) -> &'static [(f32, f32)] {
        match self {
            Sfx::Start => &[(523.0, 0.06), (659.0, 0.06), (784.0, 0.10)],
            Sfx::Eat => &[(880.0, 0.035), (1319.0, 0.05)],
            Sfx::GameOver => &[(440.0, 0.12), (370.0, 0.12), (311.0, 0.12), (261.0, 0.22)],
            Sfx::BoardCleared => &[(523.0, 0.1), (659.0, 0.1), (784.0, 0.1), (1047.0, 0.3)],
            Sfx::Pause => &[(660.0, 0.05), (440.0, 0.07)],
            Sfx::Resume => &[(440.0, 0.05), (660.0, 0.07)],
            Sfx::Blip => &[(1200.0, 0.025)],
            Sfx::Error => &[(196.0, 0.08), (147.0, 0.12)],
        }
    }
}

pub fn play_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for cue in events.iter().filter_map(Sfx::for_event) {
        sfx.play(cue);
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Sfx;

    const SAMPLE_RATE: u32 = 22050;
    const VOLUME: f32 = 0.25;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: Vec<(Sfx, Arc<Vec<u8>>)>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::warn!("audio output unavailable: {e}");
                    return None;
                }
            };

            let buffers = Sfx::ALL
                .iter()
                .map(|&cue| (cue, Arc::new(make_wav(&synth(cue.notes())))))
                .collect();

            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, cue: Sfx) {
            let Some((_, buf)) = self.buffers.iter().find(|(c, _)| *c == cue) else {
                return;
            };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    /// Square-ish tone (fundamental + 3rd harmonic), each note fading out.
    pub(super) fn synth(notes: &[(f32, f32)]) -> Vec<f32> {
        let tau = 2.0 * std::f32::consts::PI;
        let mut samples = Vec::new();
        for &(freq, dur) in notes {
            let n = (SAMPLE_RATE as f32 * dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.6);
                let wave = (t * freq * tau).sin() * 0.75 + (t * freq * 3.0 * tau).sin() * 0.25;
                samples.push(wave * env * VOLUME);
            }
        }
        samples
    }

    /// 16-bit mono PCM in a RIFF/WAVE container.
    pub(super) fn make_wav(samples: &[f32]) -> Vec<u8> {
        const CHANNELS: u16 = 1;
        const BITS: u16 = 16;
        let block_align = CHANNELS * BITS / 8;
        let byte_rate = SAMPLE_RATE * block_align as u32;
        let data_size = samples.len() as u32 * block_align as u32;

        let mut buf = Vec::with_capacity(44 + data_size as usize);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVEfmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&CHANNELS.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&BITS.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: no-ops when the sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _cue: Sfx) {}
}
