//! INI file run settings adapter.
//!
//! Settings live in a `[screener]` section and only supply defaults; explicit
//! command-line flags always win.

use crate::ports::settings_port::SettingsPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileSettingsAdapter {
    config: Ini,
}

impl FileSettingsAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl SettingsPort for FileSettingsAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .filter(|v| !v.trim().is_empty())
    }
}
