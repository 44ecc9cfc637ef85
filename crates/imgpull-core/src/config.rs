use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::process::MalformedRowPolicy;

/// Global configuration loaded from `~/.config/imgpull/config.toml`.
///
/// Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgpullConfig {
    /// Whole-request timeout per row, in seconds.
    pub timeout_secs: u64,
    /// Connection phase timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// Redirects followed before a request fails.
    pub max_redirections: u32,
    /// Directory that receives `image_<row><ext>` files (relative to the working directory).
    pub download_dir: PathBuf,
    /// Handling of CSV records that cannot be decoded: "count" (default) or "abort".
    pub on_malformed_row: MalformedRowPolicy,
}

impl Default for ImgpullConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirections: 10,
            download_dir: PathBuf::from("downloads"),
            on_malformed_row: MalformedRowPolicy::Count,
        }
    }
}

impl ImgpullConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Transport options for the fetcher.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.timeout(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirections: self.max_redirections,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgpull")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgpullConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgpullConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<ImgpullConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ImgpullConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ImgpullConfig::default();
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.max_redirections, 10);
        assert_eq!(cfg.download_dir, PathBuf::from("downloads"));
        assert_eq!(cfg.on_malformed_row, MalformedRowPolicy::Count);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ImgpullConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ImgpullConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            timeout_secs = 5
        "#;
        let cfg: ImgpullConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.download_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            timeout_secs = 10
            connect_timeout_secs = 3
            max_redirections = 2
            download_dir = "/srv/images"
            on_malformed_row = "abort"
        "#;
        let cfg: ImgpullConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.download_dir, PathBuf::from("/srv/images"));
        assert_eq!(cfg.on_malformed_row, MalformedRowPolicy::Abort);
        let opts = cfg.fetch_options();
        assert_eq!(opts.timeout, Duration::from_secs(10));
        assert_eq!(opts.connect_timeout, Duration::from_secs(3));
        assert_eq!(opts.max_redirections, 2);
    }

    #[test]
    fn config_toml_bad_policy_rejected() {
        let toml = r#"on_malformed_row = "ignore""#;
        assert!(toml::from_str::<ImgpullConfig>(toml).is_err());
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 7\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn load_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.toml"));
    }
}
