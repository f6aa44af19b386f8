use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc;

use crate::error::{GameError, Result};
use crate::note::pitch_to_freq;

/// Upper bound on simultaneously sounding voices; the oldest is dropped first.
const MAX_VOICES: usize = 16;

/// Linear fade at each end of a voice, in seconds, to avoid clicks.
const FADE_SECS: f64 = 0.01;

/// One pitch to sound, with times in seconds relative to the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceNote {
    pub pitch: u8,
    pub start_time: f64,
    pub end_time: f64,
}

/// A short sequence of pitches handed to a sound output in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteSequence {
    pub notes: Vec<SequenceNote>,
    pub total_time: f64,
}

impl NoteSequence {
    /// A single pitch starting now and lasting `duration` seconds.
    pub fn single(pitch: u8, duration: f64) -> Self {
        Self {
            notes: vec![SequenceNote {
                pitch,
                start_time: 0.0,
                end_time: duration,
            }],
            total_time: duration,
        }
    }
}

/// Something that can sound a note sequence. Fire-and-forget: the caller
/// never waits for playback and never hears about failures.
pub trait SoundOutput {
    fn start(&self, sequence: &NoteSequence);
}

/// Discards everything. Used with `--mute` and when no device is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundOutput for Silent {
    fn start(&self, _sequence: &NoteSequence) {}
}

/// A command sent to the audio thread
enum AudioCommand {
    /// Start sounding these voices, offsets in samples from now
    Play(Vec<VoiceSpec>),
}

struct VoiceSpec {
    freq: f64,
    start: u64,
    end: u64,
}

struct Voice {
    freq: f64,
    /// Absolute sample index at which the voice starts and stops
    start: u64,
    end: u64,
}

impl Voice {
    fn sample(&self, clock: u64, sample_rate: f64) -> f64 {
        if clock < self.start || clock >= self.end {
            return 0.0;
        }
        let t = (clock - self.start) as f64 / sample_rate;
        let remaining = (self.end - clock) as f64 / sample_rate;
        let envelope = (t / FADE_SECS).min(1.0) * (remaining / FADE_SECS).min(1.0);
        (t * self.freq * 2.0 * std::f64::consts::PI).sin() * envelope
    }
}

/// Sine-voice player on the default audio output.
pub struct AudioEngine {
    cmd_tx: mpsc::Sender<AudioCommand>,
    sample_rate: f64,
    // Dropping the stream stops playback.
    _stream: cpal::Stream,
}

impl AudioEngine {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| GameError::Audio("no output audio device available".into()))?;

        let config = device
            .default_output_config()
            .map_err(|e| GameError::Audio(format!("failed to get default output config: {}", e)))?;

        let sample_rate = config.sample_rate() as f64;
        let channels = config.channels() as usize;

        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();

        let mut voices: Vec<Voice> = Vec::new();
        let mut clock: u64 = 0;

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    while let Ok(cmd) = cmd_rx.try_recv() {
                        match cmd {
                            AudioCommand::Play(specs) => {
                                for spec in specs {
                                    if voices.len() >= MAX_VOICES {
                                        voices.remove(0);
                                    }
                                    voices.push(Voice {
                                        freq: spec.freq,
                                        start: clock + spec.start,
                                        end: clock + spec.end,
                                    });
                                }
                            }
                        }
                    }

                    for frame in data.chunks_mut(channels.max(1)) {
                        let mut value = 0.0_f64;
                        for voice in &voices {
                            value += voice.sample(clock, sample_rate);
                        }
                        // Gentle fixed volume; a few overlapping voices stay below 1.0
                        let value = (value * 0.2) as f32;
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                        clock += 1;
                    }

                    voices.retain(|v| v.end > clock);
                },
                move |err| {
                    log::error!("audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| GameError::Audio(format!("failed to build output stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| GameError::Audio(format!("failed to play stream: {}", e)))?;

        Ok(Self {
            cmd_tx,
            sample_rate,
            _stream: stream,
        })
    }
}

impl SoundOutput for AudioEngine {
    fn start(&self, sequence: &NoteSequence) {
        let specs = sequence
            .notes
            .iter()
            .filter(|n| n.end_time > n.start_time)
            .map(|n| VoiceSpec {
                freq: pitch_to_freq(n.pitch),
                start: (n.start_time.max(0.0) * self.sample_rate) as u64,
                end: (n.end_time.min(sequence.total_time) * self.sample_rate) as u64,
            })
            .collect();
        if self.cmd_tx.send(AudioCommand::Play(specs)).is_err() {
            log::warn!("audio thread disconnected");
        }
    }
}

/// Open the default output, or fall back to silence if that fails.
pub fn open_output(mute: bool) -> Box<dyn SoundOutput> {
    if mute {
        return Box::new(Silent);
    }
    match AudioEngine::new() {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            log::warn!("{}; continuing without sound", e);
            Box::new(Silent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_note_sequence() {
        let seq = NoteSequence::single(60, 0.3);
        assert_eq!(seq.notes.len(), 1);
        assert_eq!(seq.notes[0].pitch, 60);
        assert_eq!(seq.notes[0].start_time, 0.0);
        assert_eq!(seq.notes[0].end_time, 0.3);
        assert_eq!(seq.total_time, 0.3);
    }

    #[test]
    fn test_voice_silent_outside_its_span() {
        let voice = Voice {
            freq: 440.0,
            start: 100,
            end: 200,
        };
        assert_eq!(voice.sample(99, 44_100.0), 0.0);
        assert_eq!(voice.sample(200, 44_100.0), 0.0);
    }

    #[test]
    fn test_voice_fades_in() {
        let voice = Voice {
            freq: 440.0,
            start: 0,
            end: 44_100,
        };
        // First sample is at phase zero and zero envelope.
        assert_eq!(voice.sample(0, 44_100.0), 0.0);
        let mid = (0..44_100)
            .map(|c| voice.sample(c, 44_100.0).abs())
            .fold(0.0_f64, f64::max);
        assert!(mid > 0.9 && mid <= 1.0);
    }
}
