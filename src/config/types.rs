// termpong configuration types
// Every table falls back to defaults, so a partial file is fine

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game::MatchLength;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub gameplay: GameplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Ticks per second (simulation and redraw run together)
    pub target_fps: u64,

    // Paddles, ball and text (RGB values 0-255)
    pub foreground: [u8; 3],

    pub background: [u8; 3],

    pub center_line: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            foreground: [255, 255, 255], // White
            background: [0, 0, 0],       // Black
            center_line: [255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,

    // Directory holding paddle_hit.wav, wall_bounce.wav and score.wav
    pub asset_dir: PathBuf,

    // Master volume 0.0 - 1.0
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            asset_dir: PathBuf::from("assets"),
            volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GameplayConfig {
    // Mode used by Enter on the menu until a digit picks another (3, 5 or 7)
    pub default_winning_score: MatchLength,

    // Fixed RNG seed for reproducible serves
    pub seed: Option<u64>,
}
