use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PaperId;
use crate::source::http::DEFAULT_BASE_URL;
use crate::viewer::ColorScheme;

/// Paper opened by the landing view's "View Sample Paper" action.
pub const DEFAULT_SAMPLE_PAPER: &str = "1706.03762";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub display: Option<DisplayConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub sample_paper_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<String>,
}

/// Platform config directory path: `<config_dir>/readable/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("readable").join("config.toml"))
}

/// Load config by cascading CWD `.readable.toml` over platform config.
/// CWD values override platform values. Unreadable files are logged and
/// skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_optional(&p));
    let cwd = load_optional(Path::new(".readable.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_optional(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match load_from_path(path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let base_logging = base.logging.unwrap_or_default();
    let server = overlay.server.unwrap_or_default();
    let display = overlay.display.unwrap_or_default();
    let logging = overlay.logging.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            base_url: server.base_url.or(base_server.base_url),
            request_timeout_secs: server
                .request_timeout_secs
                .or(base_server.request_timeout_secs),
            sample_paper_id: server.sample_paper_id.or(base_server.sample_paper_id),
        }),
        display: Some(DisplayConfig {
            theme: display.theme.or(base_display.theme),
            fps: display.fps.or(base_display.fps),
        }),
        logging: Some(LoggingConfig {
            level: logging.level.or(base_logging.level),
            dir: logging.dir.or(base_logging.dir),
        }),
    }
}

/// Fully resolved settings with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub sample_paper_id: PaperId,
    pub color_scheme: ColorScheme,
    pub fps: u32,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            sample_paper_id: PaperId::new(DEFAULT_SAMPLE_PAPER).expect("sample id is not blank"),
            color_scheme: ColorScheme::Light,
            fps: 10,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Fill in the values present in `file`, keeping defaults for the rest.
    pub fn from_config(file: &ConfigFile) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(server) = &file.server {
            if let Some(url) = server.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
                settings.base_url = url.trim().trim_end_matches('/').to_string();
            }
            if let Some(secs) = server.request_timeout_secs {
                settings.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            if let Some(id) = server.sample_paper_id.as_deref().and_then(PaperId::new) {
                settings.sample_paper_id = id;
            }
        }
        if let Some(display) = &file.display {
            if let Some(theme) = &display.theme {
                settings.color_scheme = theme.parse().map_err(|message| ConfigError::Invalid {
                    field: "display.theme",
                    message,
                })?;
            }
            if let Some(fps) = display.fps {
                settings.fps = fps.clamp(1, 60);
            }
        }
        if let Some(logging) = &file.logging {
            if let Some(level) = logging.level.as_deref().filter(|l| !l.is_empty()) {
                settings.log_level = level.to_string();
            }
            if let Some(dir) = logging.dir.as_deref().filter(|d| !d.is_empty()) {
                settings.log_dir = Some(PathBuf::from(dir));
            }
        }
        Ok(settings)
    }
}
