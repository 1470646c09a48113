use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
    pub user: Option<UserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            token: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UserConfig {
    pub name: Option<String>,
}

impl AppConfig {
    pub fn api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    /// Name attached to card comments.
    pub fn author(&self) -> String {
        self.user
            .as_ref()
            .and_then(|u| u.name.clone())
            .unwrap_or_else(|| "me".into())
    }
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".planner")
        .join("config.toml")
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".planner")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}

/// Last board the user had open; restored on startup.
#[derive(Debug, Serialize, Deserialize, Default)]
struct AppState {
    selected_board: Option<i64>,
}

fn state_path() -> PathBuf {
    data_dir().join("state.toml")
}

pub fn load_selected_board() -> Option<i64> {
    read_state(&state_path()).selected_board
}

pub fn save_selected_board(board_id: i64) -> Result<()> {
    let state = AppState {
        selected_board: Some(board_id),
    };
    write_state(&state_path(), &state)
}

fn read_state(path: &Path) -> AppState {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str(&contents).ok())
        .unwrap_or_default()
}

fn write_state(path: &Path, state: &AppState) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let contents = toml::to_string(state).context("Failed to serialize state")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://planner.example.com"
            token = "secret"

            [user]
            name = "Sam"
            "#,
        )
        .unwrap();
        assert_eq!(config.api().base_url, "https://planner.example.com");
        assert_eq!(config.api().token.as_deref(), Some("secret"));
        assert_eq!(config.author(), "Sam");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.api().base_url, "http://localhost:5000");
        assert_eq!(config.author(), "me");
    }

    #[test]
    fn state_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");

        assert_eq!(read_state(&path).selected_board, None);

        write_state(
            &path,
            &AppState {
                selected_board: Some(42),
            },
        )
        .unwrap();
        assert_eq!(read_state(&path).selected_board, Some(42));
    }

    #[test]
    fn corrupt_state_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "not toml [").unwrap();
        assert_eq!(read_state(&path).selected_board, None);
    }
}
