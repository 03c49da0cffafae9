// Sound output mixer
//
// With the `audio` feature the mixer opens the default cpal output stream
// and mixes active voices in the stream callback. Without it, `Mixer::start`
// always fails so callers fall back to silent cues.

use std::sync::{Arc, Mutex};

use super::clip::Clip;

/// Maximum number of simultaneous voices.
const MAX_VOICES: usize = 16;

/// One playing instance of a clip.
struct Voice {
    clip: Arc<Clip>,
    position: f32,
}

impl Voice {
    /// Nearest-sample resampling from the clip rate to the output rate.
    fn next_sample(&mut self, output_rate: f32) -> Option<f32> {
        let sample = self.clip.samples.get(self.position as usize).copied();
        self.position += self.clip.sample_rate as f32 / output_rate;
        sample
    }

    fn is_done(&self) -> bool {
        self.position as usize >= self.clip.samples.len()
    }
}

/// Shared between the game loop (triggering) and the output callback (mixing).
struct MixerState {
    voices: Vec<Voice>,
    sample_rate: f32,
    master_volume: f32,
}

impl MixerState {
    fn push(&mut self, clip: Arc<Clip>) {
        self.voices.retain(|v| !v.is_done());
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice { clip, position: 0.0 });
    }

    /// Fill `out` with mono samples, one value per output frame.
    fn mix_into(&mut self, out: &mut [f32]) {
        let rate = self.sample_rate;
        for value in out.iter_mut() {
            let mut sum = 0.0_f32;
            for voice in self.voices.iter_mut() {
                if let Some(s) = voice.next_sample(rate) {
                    sum += s;
                }
            }
            *value = soft_clip(sum * self.master_volume);
        }
        self.voices.retain(|v| !v.is_done());
    }
}

/// Cloneable handle to the output mixer
#[derive(Clone)]
pub struct Mixer {
    state: Arc<Mutex<MixerState>>,
    #[cfg(feature = "audio")]
    _stream: Arc<backend::StreamHandle>,
}

impl Mixer {
    /// Queue a clip for playback. Never blocks on the audio thread for long
    /// and silently drops the request if the mixer lock is poisoned.
    pub fn play(&self, clip: &Arc<Clip>) {
        if let Ok(mut state) = self.state.lock() {
            state.push(Arc::clone(clip));
        }
    }

    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    fn shared_state(volume: f32, sample_rate: f32) -> Arc<Mutex<MixerState>> {
        Arc::new(Mutex::new(MixerState {
            voices: Vec::new(),
            sample_rate,
            master_volume: volume.clamp(0.0, 1.0),
        }))
    }
}

#[cfg(feature = "audio")]
impl Mixer {
    /// Open the default output device.
    pub fn start(volume: f32) -> anyhow::Result<Self> {
        let (stream, state) = backend::open(volume)?;
        Ok(Self {
            state,
            _stream: Arc::new(stream),
        })
    }
}

#[cfg(not(feature = "audio"))]
impl Mixer {
    pub fn start(_volume: f32) -> anyhow::Result<Self> {
        anyhow::bail!("built without the `audio` feature")
    }
}

#[cfg(feature = "audio")]
mod backend {
    use anyhow::{anyhow, Context, Result};
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::sync::{Arc, Mutex};

    use super::{Mixer, MixerState};

    /// Keeps the cpal stream alive for as long as any mixer handle exists.
    pub(super) struct StreamHandle(#[allow(dead_code)] cpal::Stream);

    pub(super) fn open(volume: f32) -> Result<(StreamHandle, Arc<Mutex<MixerState>>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no audio output device found"))?;
        let config = device
            .default_output_config()
            .context("no default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let state = Mixer::shared_state(volume, sample_rate);
        let callback_state = Arc::clone(&state);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => device.build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_f32(data, channels, &callback_state);
                },
                |err| tracing::warn!("audio stream error: {err}"),
                None,
            ),
            cpal::SampleFormat::I16 => device.build_output_stream(
                &config.into(),
                move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                    let mut buf = vec![0.0_f32; data.len()];
                    fill_f32(&mut buf, channels, &callback_state);
                    for (out, sample) in data.iter_mut().zip(buf) {
                        *out = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                    }
                },
                |err| tracing::warn!("audio stream error: {err}"),
                None,
            ),
            format => return Err(anyhow!("unsupported sample format: {format:?}")),
        }
        .context("failed to build output stream")?;

        stream.play().context("failed to start output stream")?;
        tracing::debug!(sample_rate, channels, "audio output started");

        Ok((StreamHandle(stream), state))
    }

    fn fill_f32(data: &mut [f32], channels: usize, state: &Arc<Mutex<MixerState>>) {
        data.fill(0.0);
        let Ok(mut state) = state.lock() else {
            return;
        };

        let mut mono = vec![0.0_f32; data.len() / channels.max(1)];
        state.mix_into(&mut mono);

        for (frame, value) in data.chunks_mut(channels.max(1)).zip(mono) {
            frame.fill(value);
        }
    }
}

/// Soft clipping so overlapping cues don't distort harshly.
fn soft_clip(x: f32) -> f32 {
    if x.abs() < 0.5 {
        x
    } else {
        x.signum() * (1.0 - (-2.0 * (x.abs() - 0.5)).exp() * 0.5)
    }
}
