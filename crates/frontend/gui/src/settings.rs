use ocho_chip8::{Config, Quirks};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Integer upscaling factor for the 64x32 display.
    pub scale: usize,
    pub instructions_per_second: u32,
    pub shift_source_vy: bool,
    pub jump_offset_vx: bool,
    pub index_increment: bool,
    #[serde(default)]
    pub last_rom_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            scale: 16, // 1024x512 window
            instructions_per_second: config.instructions_per_second,
            shift_source_vy: config.quirks.shift_source_vy,
            jump_offset_vx: config.quirks.jump_offset_vx,
            index_increment: config.quirks.index_increment,
            last_rom_path: None,
        }
    }
}

impl Settings {
    /// Get the config file path relative to the executable
    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("config.json");
        path
    }

    /// Load settings from config.json, falling back to defaults on error
    pub fn load() -> Self {
        let path = Self::config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config.json: {}. Using defaults.",
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist or can't be read, use defaults
                Self::default()
            }
        }
    }

    /// Save settings to config.json immediately
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path();
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Machine configuration picked out of the settings file.
    pub fn machine_config(&self) -> Config {
        Config {
            instructions_per_second: self.instructions_per_second.max(1),
            quirks: Quirks {
                shift_source_vy: self.shift_source_vy,
                jump_offset_vx: self.jump_offset_vx,
                index_increment: self.index_increment,
            },
        }
    }
}
