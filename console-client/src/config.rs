use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tictactoe_engine::Mark;
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";

pub type ConsoleConfigManager = ConfigManager<FileContentConfigProvider, ConsoleConfig, YamlConfigSerializer>;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path: Option<PathBuf>) -> ConsoleConfigManager {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ConsoleConfig {
    pub human_mark: Mark,
    #[serde(default = "default_true")]
    pub show_cell_numbers: bool,
    #[serde(default)]
    pub explain_ai_moves: bool,
}

fn default_true() -> bool {
    true
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            show_cell_numbers: true,
            explain_ai_moves: false,
        }
    }
}
