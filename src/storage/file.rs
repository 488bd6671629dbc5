use std::fs;
use std::path::{Path, PathBuf};

use super::ContactStore;
use crate::models::ContactInfo;
use crate::{Error, Result};

/// Contact details stored as JSON at a fixed path.
///
/// A missing file reads as an empty contact, not an error.
pub struct FileContactStore {
    path: PathBuf,
}

impl FileContactStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Stores under the platform config directory, for example
    /// `~/.config/contentpro/contact.json` on Linux.
    pub fn at_default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Storage("Could not determine config directory".to_string()))?;

        Ok(Self::new(config_dir.join("contentpro").join("contact.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStore for FileContactStore {
    fn load(&self) -> Result<ContactInfo> {
        if !self.path.exists() {
            return Ok(ContactInfo::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let contact = serde_json::from_str(&content)?;
        Ok(contact)
    }

    fn save(&self, contact: &ContactInfo) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(contact)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
