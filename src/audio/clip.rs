// WAV decoding for sound effect assets

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// A decoded sound effect, mixed down to mono
#[derive(Debug, Clone)]
pub struct Clip {
    pub name: String,
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Clip {
    /// Decode a PCM or float WAV file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = WavReader::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let spec = reader.spec();

        if spec.channels == 0 {
            bail!("{} declares zero channels", path.display());
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .with_context(|| format!("failed to decode {}", path.display()))?,
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .with_context(|| format!("failed to decode {}", path.display()))?
            }
        };

        let channels = spec.channels as usize;
        let samples = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            samples,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
