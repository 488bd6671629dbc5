use std::sync::{Arc, Mutex};

use super::ContactStore;
use crate::models::ContactInfo;
use crate::Result;

/// In-memory contact store.
///
/// Clones share contents, so a test can hand one to a session and
/// keep a handle for assertions.
#[derive(Clone, Default)]
pub struct MemoryContactStore {
    contact: Arc<Mutex<ContactInfo>>,
    save_count: Arc<Mutex<usize>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact(contact: ContactInfo) -> Self {
        let store = Self::new();
        *store.contact.lock().unwrap() = contact;
        store
    }

    pub fn get_save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }

    pub fn contact(&self) -> ContactInfo {
        self.contact.lock().unwrap().clone()
    }
}

impl ContactStore for MemoryContactStore {
    fn load(&self) -> Result<ContactInfo> {
        Ok(self.contact.lock().unwrap().clone())
    }

    fn save(&self, contact: &ContactInfo) -> Result<()> {
        *self.contact.lock().unwrap() = contact.clone();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}
