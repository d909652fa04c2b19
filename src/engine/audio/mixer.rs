// Sound-effect playback through cpal
//
// One output stream, a handful of short one-shot voices. The stream
// callback drains a shared voice list; game code only ever pushes to it.

use super::wav::Sound;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};
use log::warn;
use std::sync::{Arc, Mutex};

/// Output sample rate requested from the device
const OUTPUT_SAMPLE_RATE: u32 = 44100;

/// One playing sound effect
struct Voice {
    sound: Arc<Sound>,
    /// Fractional read position in the sound's samples
    cursor: f32,
    /// Cursor advance per output frame (resamples to the output rate)
    step: f32,
}

impl Voice {
    fn new(sound: Arc<Sound>, output_rate: f32) -> Self {
        let step = sound.sample_rate as f32 / output_rate;
        Self {
            sound,
            cursor: 0.0,
            step,
        }
    }

    /// Next sample, linearly interpolated; None when the sound is over
    fn next_sample(&mut self) -> Option<f32> {
        let samples = &self.sound.samples;
        let index = self.cursor as usize;
        if index + 1 >= samples.len() {
            return None;
        }

        let fraction = self.cursor - index as f32;
        let value = samples[index] * (1.0 - fraction) + samples[index + 1] * fraction;
        self.cursor += self.step;
        Some(value)
    }
}

/// Voice list shared with the stream callback
#[derive(Default)]
struct MixerState {
    voices: Vec<Voice>,
}

impl MixerState {
    /// Mix all voices into an interleaved stereo buffer
    fn mix_into(&mut self, data: &mut [f32]) {
        data.fill(0.0);

        for frame in data.chunks_exact_mut(2) {
            let mut mixed = 0.0;
            for voice in &mut self.voices {
                if let Some(sample) = voice.next_sample() {
                    mixed += sample;
                }
            }
            frame[0] = mixed;
            frame[1] = mixed;
        }

        self.voices.retain(|voice| {
            (voice.cursor as usize) + 1 < voice.sound.samples.len()
        });
    }
}

/// Sound-effect mixer
///
/// Falls back to silence when no output device is available; the game must
/// still run on machines without audio.
pub struct Mixer {
    state: Arc<Mutex<MixerState>>,
    output_rate: f32,
    _stream: Option<cpal::Stream>,
}

impl Mixer {
    /// Create a mixer on the default output device
    pub fn new() -> Self {
        let state = Arc::new(Mutex::new(MixerState::default()));
        let stream = Self::open_stream(state.clone());
        if stream.is_none() {
            warn!("No audio output device; sound effects disabled");
        }

        Self {
            state,
            output_rate: OUTPUT_SAMPLE_RATE as f32,
            _stream: stream,
        }
    }

    fn open_stream(state: Arc<Mutex<MixerState>>) -> Option<cpal::Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;

        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(OUTPUT_SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if let Ok(mut state) = state.lock() {
                        state.mix_into(data);
                    } else {
                        data.fill(0.0);
                    }
                },
                |err| warn!("Audio stream error: {}", err),
                None,
            )
            .ok()?;

        stream.play().ok()?;
        Some(stream)
    }

    /// Start playing a sound effect
    pub fn play(&self, sound: &Arc<Sound>) {
        if let Ok(mut state) = self.state.lock() {
            state.voices.push(Voice::new(sound.clone(), self.output_rate));
        }
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}
