//! Persistence for contact details.
//!
//! Contact fields survive across sessions in a small JSON file;
//! everything else is per-session state. Sessions load once at
//! startup and write through on every change.

pub mod file;
pub mod memory;

pub use file::FileContactStore;
pub use memory::MemoryContactStore;

use crate::models::ContactInfo;
use crate::Result;

/// Loads and saves the persisted contact fields.
pub trait ContactStore: Send + Sync {
    fn load(&self) -> Result<ContactInfo>;
    fn save(&self, contact: &ContactInfo) -> Result<()>;
}
