use pythia::gemini::config::API_KEY_ENV;
use pythia::{Credentials, GeminiConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Relative locations tried when no explicit config path is given
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/truefuture.toml", "../../configs/truefuture.toml"];

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub gemini: GeminiConfig,
    pub ephemeris_path: Option<PathBuf>,
    pub credentials: Credentials,
    /// File the settings came from, if any
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    gemini: GeminiConfig,
    #[serde(default)]
    ephemeris: EphemerisToml,
}

/// Read the config text from `path`, or from the first default location that exists.
///
/// An explicit path that cannot be read is an error; missing default files are not.
pub fn read_config_text(path: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Build settings from TOML text and an environment lookup.
///
/// The API key only ever comes from the environment; the ephemeris path from
/// the environment only when the file leaves it unset.
pub fn parse_settings<F>(text: Option<&str>, env: F) -> anyhow::Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let root: RootConfigToml = match text {
        Some(text) => toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse truefuture.toml: {e}"))?,
        None => RootConfigToml::default(),
    };

    let ephemeris_path = root.ephemeris.path.or_else(|| {
        env(EPHEMERIS_PATH_ENV)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    });
    let credentials = env(API_KEY_ENV).map(Credentials::new).unwrap_or_default();

    Ok(Settings {
        gemini: root.gemini,
        ephemeris_path,
        credentials,
        source: None,
    })
}

/// Load settings from disk and the process environment
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let found = read_config_text(path)?;
    let env = |key: &str| std::env::var(key).ok();
    match found {
        Some((source, text)) => {
            log::debug!("Loading settings from {}", source.display());
            let mut settings = parse_settings(Some(&text), env)?;
            settings.source = Some(source);
            Ok(settings)
        }
        None => {
            log::debug!("No truefuture.toml found in {:?}; using defaults", DEFAULT_CONFIG_PATHS);
            parse_settings(None, env)
        }
    }
}
