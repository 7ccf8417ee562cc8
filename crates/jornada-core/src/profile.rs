//! Onboarding profile fields kept alongside progress.

use serde::Serialize;

use crate::error::Result;
use crate::storage::{keys, KvStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_name: Option<String>,
    pub has_onboarded: bool,
}

pub struct ProfileStore<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> ProfileStore<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Profile> {
        let user_name = self
            .store
            .get(keys::USER_NAME)?
            .filter(|name| !name.trim().is_empty());
        // Older installs wrote "true".
        let has_onboarded = matches!(
            self.store.get(keys::HAS_ONBOARDED)?.as_deref(),
            Some("1") | Some("true")
        );
        Ok(Profile {
            user_name,
            has_onboarded,
        })
    }

    /// Store a trimmed, non-blank name. Returns false for blank input.
    pub fn set_user_name(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.store.set(keys::USER_NAME, name)?;
        Ok(true)
    }

    pub fn set_has_onboarded(&self, done: bool) -> Result<()> {
        self.store
            .set(keys::HAS_ONBOARDED, if done { "1" } else { "0" })?;
        Ok(())
    }

    /// Forget the profile so onboarding runs again.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::USER_NAME)?;
        self.store.remove(keys::HAS_ONBOARDED)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_store_is_default_profile() {
        let store = MemoryStore::new();
        assert_eq!(ProfileStore::new(&store).load().unwrap(), Profile::default());
    }

    #[test]
    fn name_is_trimmed_and_blank_ignored() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        assert!(!profiles.set_user_name("   ").unwrap());
        assert!(profiles.set_user_name("  Ana ").unwrap());
        assert_eq!(profiles.load().unwrap().user_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn onboarding_flag_accepts_legacy_value() {
        let store = MemoryStore::with_entries([(keys::HAS_ONBOARDED, "true")]);
        assert!(ProfileStore::new(&store).load().unwrap().has_onboarded);

        let profiles = ProfileStore::new(&store);
        profiles.set_has_onboarded(false).unwrap();
        assert!(!profiles.load().unwrap().has_onboarded);
        profiles.set_has_onboarded(true).unwrap();
        assert_eq!(store.get(keys::HAS_ONBOARDED).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn clear_forgets_everything() {
        let store = MemoryStore::new();
        let profiles = ProfileStore::new(&store);
        profiles.set_user_name("Ana").unwrap();
        profiles.set_has_onboarded(true).unwrap();
        profiles.clear().unwrap();
        assert_eq!(profiles.load().unwrap(), Profile::default());
    }
}
