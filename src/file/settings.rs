// src/file/settings.rs
use super::FileHandler;
use crate::config::ClientConfig;
use crate::error::Result;
use std::path::Path;
use std::fs;

#[derive(Debug)]
pub struct SettingsFileHandler;

impl SettingsFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<ClientConfig> for SettingsFileHandler {
    fn load(&self, path: &Path) -> Result<ClientConfig> {
        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    fn save(&self, data: &ClientConfig, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(4)
        )?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_survive_a_save_and_load() {
        let dir = std::env::temp_dir().join(format!("sentiment-desk-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("config.ron");

        let mut config = ClientConfig::default();
        config.export_file_name = "predictions.csv".to_string();

        let handler = SettingsFileHandler::new();
        handler.save(&config, &path).unwrap();
        assert_eq!(handler.load(&path).unwrap(), config);

        fs::remove_dir_all(&dir).ok();
    }
}
