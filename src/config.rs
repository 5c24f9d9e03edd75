use crate::store::IdPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    pub data_file: PathBuf,
    pub export_file: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    pub currency_symbol: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IdsConfig {
    pub policy: IdPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub paths: PathsConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub ids: IdsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    pub base_dir: PathBuf,
}

impl AppConfig {
    /// Reads `settings.json` from `base_dir` (or the platform data directory),
    /// writing the defaults on first run.
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => project_dirs()?.data_dir().to_path_buf(),
        };
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create {}", base_dir.display()))?;

        let settings_path = base_dir.join("settings.json");
        let settings: Settings = load_or_write(&settings_path, default_settings(&base_dir))?;

        Ok(AppConfig { settings, base_dir })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }
}

fn load_or_write<T>(path: &Path, default: T) -> Result<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        let data = serde_json::to_string_pretty(&default)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        return Ok(default);
    }
    let bytes =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&bytes)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "example", "expense_tracker")
        .context("Unable to determine platform data directory")
}

fn default_settings(base_dir: &Path) -> Settings {
    Settings {
        paths: PathsConfig {
            data_file: base_dir.join("expenses.json"),
            export_file: base_dir.join("expenses.csv"),
        },
        ui: UiConfig {
            currency_symbol: "£".into(),
        },
        ids: IdsConfig::default(),
    }
}
