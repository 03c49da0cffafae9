// Sound cues for collision and scoring events
//
// Every cue is resolved once at startup. Anything that goes wrong (missing
// file, bad WAV, no output device, audio compiled out) degrades that cue to
// silence with a warning in the debug log; the game never sees the failure.

mod clip;
mod output;

use std::path::Path;
use std::sync::Arc;

pub use clip::Clip;
pub use output::Mixer;

use crate::config::AudioConfig;

pub const PADDLE_HIT_FILE: &str = "paddle_hit.wav";
pub const WALL_BOUNCE_FILE: &str = "wall_bounce.wav";
pub const SCORE_FILE: &str = "score.wav";

/// A sound effect that can be fired and forgotten
pub trait AudioCue {
    fn play(&self);
}

/// Stand-in for a cue whose asset or output device is unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) {}
}

/// A decoded clip bound to the output mixer
pub struct LoadedCue {
    clip: Arc<Clip>,
    mixer: Mixer,
}

impl LoadedCue {
    pub fn new(clip: Clip, mixer: Mixer) -> Self {
        Self {
            clip: Arc::new(clip),
            mixer,
        }
    }
}

impl AudioCue for LoadedCue {
    fn play(&self) {
        self.mixer.play(&self.clip);
    }
}

/// The three cues the engine fires
pub struct SoundBank {
    pub paddle_hit: Box<dyn AudioCue>,
    pub wall_bounce: Box<dyn AudioCue>,
    pub score: Box<dyn AudioCue>,
}

impl SoundBank {
    pub fn silent() -> Self {
        Self {
            paddle_hit: Box::new(SilentCue),
            wall_bounce: Box::new(SilentCue),
            score: Box::new(SilentCue),
        }
    }

    /// Best-effort load of all cues from `config.asset_dir`.
    pub fn load(config: &AudioConfig) -> Self {
        if !config.enabled {
            tracing::info!("audio disabled, using silent cues");
            return Self::silent();
        }

        let mixer = match Mixer::start(config.volume) {
            Ok(mixer) => mixer,
            Err(e) => {
                tracing::warn!("audio output unavailable ({e:#}), using silent cues");
                return Self::silent();
            }
        };

        Self {
            paddle_hit: load_cue(&config.asset_dir, PADDLE_HIT_FILE, &mixer),
            wall_bounce: load_cue(&config.asset_dir, WALL_BOUNCE_FILE, &mixer),
            score: load_cue(&config.asset_dir, SCORE_FILE, &mixer),
        }
    }
}

fn load_cue(dir: &Path, file: &str, mixer: &Mixer) -> Box<dyn AudioCue> {
    let path = dir.join(file);
    match Clip::load(&path) {
        Ok(clip) => {
            tracing::debug!(
                cue = %clip.name,
                secs = clip.duration_secs(),
                "loaded sound"
            );
            Box::new(LoadedCue::new(clip, mixer.clone()))
        }
        Err(e) => {
            tracing::warn!("sound {} unavailable ({e:#}), using silent cue", path.display());
            Box::new(SilentCue)
        }
    }
}
