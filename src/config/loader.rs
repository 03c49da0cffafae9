// Configuration file loading (read-only; the game never writes settings)

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Default location of the configuration file, if the platform has one
pub fn get_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("termpong");
    path.push("config.toml");
    Some(path)
}

/// Load configuration.
///
/// An explicit path must exist. The default path is optional: a missing
/// file just means defaults. A file that fails to parse is reported and
/// replaced by defaults rather than aborting startup.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    Ok(parse_config(&contents, &path))
}

fn parse_config(contents: &str, path: &Path) -> Config {
    match toml::from_str(contents) {
        Ok(config) => {
            tracing::info!("loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("failed to parse {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MatchLength;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.display.target_fps, config.display.target_fps);
        assert_eq!(parsed.audio.asset_dir, config.audio.asset_dir);
        assert_eq!(
            parsed.gameplay.default_winning_score,
            config.gameplay.default_winning_score
        );
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [gameplay]
            default_winning_score = 7

            [audio]
            volume = 0.8
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.gameplay.default_winning_score, MatchLength::BestOf7);
        assert_eq!(config.audio.volume, 0.8);

        // Untouched fields keep their defaults
        assert!(config.audio.enabled);
        assert_eq!(config.display.target_fps, 60);
        assert_eq!(config.gameplay.seed, None);
    }

    #[test]
    fn test_invalid_winning_score_falls_back_to_defaults() {
        let config = parse_config(
            "[gameplay]\ndefault_winning_score = 4\n",
            Path::new("bad.toml"),
        );
        assert_eq!(config.gameplay.default_winning_score, MatchLength::BestOf5);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let path = std::env::temp_dir().join("termpong-no-such-config.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "termpong-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[gameplay]\nseed = 42\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.gameplay.seed, Some(42));
    }
}
