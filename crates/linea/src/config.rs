use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub prompt: String,
    pub history: HistoryConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub max_entries: usize,
    pub ignore_duplicates: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: String::from("> "),
            history: HistoryConfig {
                max_entries: 100,
                ignore_duplicates: true,
            },
            editor: EditorConfig { tab_width: 4 },
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if try_exists(&config_path).await? {
                match tokio::fs::read_to_string(&config_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Config file is empty, creating new one");
                            let default_config = Self::default();
                            let _ = default_config.save().await;
                            return Ok(default_config);
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut config) => {
                                config.validate()?;
                                log::info!(
                                    "Successfully loaded config from: {}",
                                    config_path.display()
                                );
                                return Ok(config);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse config file: {}", json_err);

                                // Keep the broken file around for inspection
                                let backup_path = config_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&config_path, &backup_path).await {
                                    log::warn!("Failed to backup broken config: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken config to: {}",
                                        backup_path.display()
                                    );
                                }

                                let default_config = Self::default();
                                let _ = default_config.save().await;
                                return Ok(default_config);
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read config file: {}", io_err);
                    }
                }
            } else {
                log::info!("Config file does not exist, creating default");
            }
        }

        let default_config = Self::default();
        let _ = default_config.save().await;
        Ok(default_config)
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::config_path() {
            let mut config_to_save = self.clone();
            config_to_save.validate()?;

            if let Some(parent) = config_path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Err(anyhow::anyhow!(
                        "failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ));
                }
            }

            match serde_json::to_string_pretty(&config_to_save) {
                Ok(content) => match tokio::fs::write(&config_path, content).await {
                    Ok(_) => {
                        log::info!("Successfully saved config to: {}", config_path.display());
                    }
                    Err(e) => {
                        return Err(anyhow::anyhow!(
                            "failed to write config file {}: {}",
                            config_path.display(),
                            e
                        ));
                    }
                },
                Err(e) => {
                    return Err(anyhow::anyhow!("failed to serialize config: {}", e));
                }
            }
        }
        Ok(())
    }

    /// Validate configuration values and fix invalid ones
    pub fn validate(&mut self) -> Result<()> {
        let mut has_issues = false;

        if self.prompt.is_empty() {
            log::warn!("Empty prompt, using default");
            self.prompt = String::from("> ");
            has_issues = true;
        }

        if self.history.max_entries == 0 || self.history.max_entries > 10_000 {
            log::warn!(
                "Invalid history capacity: {}, using default",
                self.history.max_entries
            );
            self.history.max_entries = 100;
            has_issues = true;
        }

        if self.editor.tab_width == 0 || self.editor.tab_width > 16 {
            log::warn!("Invalid tab width: {}, using default", self.editor.tab_width);
            self.editor.tab_width = 4;
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }

        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LINEA_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("LINEA_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "linea", "linea")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
