use crate::{KeyValueStore, StorageResult};

use std::sync::Arc;

use lms_core::{Identity, Portal};
use log::{debug, warn};

const FIELD_ROLE: &str = "role";
const FIELD_EMAIL: &str = "email";
const FIELD_NAME: &str = "name";
const FIELD_AVATAR: &str = "avatar";
const FIELD_IDENTITY: &str = "identity";

const FIELDS: [&str; 5] = [
    FIELD_ROLE,
    FIELD_EMAIL,
    FIELD_NAME,
    FIELD_AVATAR,
    FIELD_IDENTITY,
];

/// Portal-scoped durable mirror of the current identity.
///
/// Keys are `{portal}.{field}`. The full identity is also kept as a JSON blob; the
/// individual keys are the fallback when the blob is missing or unreadable.
#[derive(Clone)]
pub struct PersistenceAdapter {
    portal: Portal,
    storage: Arc<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    pub fn new(portal: Portal, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { portal, storage }
    }

    pub fn portal(&self) -> Portal {
        self.portal
    }

    pub fn key(&self, field: &str) -> String {
        format!("{}.{}", self.portal.storage_namespace(), field)
    }

    fn keys(&self) -> Vec<String> {
        FIELDS.iter().map(|f| self.key(f)).collect()
    }

    /// Replaces the whole persisted record in one write.
    pub fn save(&self, identity: &Identity) -> StorageResult<()> {
        let blob = serde_json::to_string(identity)?;
        let entries = vec![
            (self.key(FIELD_ROLE), identity.role.clone()),
            (self.key(FIELD_EMAIL), identity.email.clone()),
            (self.key(FIELD_NAME), identity.display_name()),
            (self.key(FIELD_AVATAR), identity.avatar_url.clone()),
            (self.key(FIELD_IDENTITY), blob),
        ];
        self.storage.set_many(&entries)?;
        debug!("Persisted {} identity for {}", self.portal, identity.email);
        Ok(())
    }

    pub fn load(&self) -> StorageResult<Option<Identity>> {
        if let Some(blob) = self.storage.get(&self.key(FIELD_IDENTITY))? {
            match serde_json::from_str::<Identity>(&blob) {
                Ok(identity) if identity.is_recognizable() => return Ok(Some(identity)),
                Ok(_) => debug!("Persisted {} identity blob is empty", self.portal),
                Err(e) => warn!("Persisted {} identity blob unreadable: {e}", self.portal),
            }
        }

        let email = self.field(FIELD_EMAIL)?;
        let role = self.field(FIELD_ROLE)?;
        if email.is_empty() && role.is_empty() {
            return Ok(None);
        }

        let name = self.field(FIELD_NAME)?;
        let avatar = self.field(FIELD_AVATAR)?;
        let identity = Identity::from_display_name(email, role, &name).with_avatar(avatar);
        Ok(identity.is_recognizable().then_some(identity))
    }

    /// Removes every key of the record in one write.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_many(&self.keys())?;
        debug!("Cleared persisted {} identity", self.portal);
        Ok(())
    }

    fn field(&self, field: &str) -> StorageResult<String> {
        Ok(self.storage.get(&self.key(field))?.unwrap_or_default())
    }
}
