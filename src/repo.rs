//! Record-shaped CRUD on top of the file store.
//!
//! The repository is a dumb persistence mapper: it normalizes fields,
//! assigns ids and timestamps, and keeps ids unique, but it does *not*
//! enforce email uniqueness — that rule lives in the use-case layer.

use crate::error::Result;
use crate::id::IdGenerator;
use crate::model::{
    normalize_email, normalize_name, now_millis, NewUser, UserPatch, UserRecord, UsersDocument,
};
use crate::store::JsonFile;
use std::sync::Arc;

/// CRUD operations over the `{ "users": [...] }` document.
pub struct UserRepository {
    db: Arc<JsonFile<UsersDocument>>,
    ids: Arc<dyn IdGenerator>,
}

impl UserRepository {
    /// Build a repository over `db`, drawing new ids from `ids`.
    pub fn new(db: Arc<JsonFile<UsersDocument>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { db, ids }
    }

    /// Linear scan by id. Absence is a normal outcome, not an error.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let doc = self.db.read().await?;
        Ok(doc.users.into_iter().find(|u| u.id == id))
    }

    /// Case-insensitive linear scan by normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let needle = normalize_email(email);
        let doc = self.db.read().await?;
        Ok(doc
            .users
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle))
    }

    /// All records in storage order. The returned vector is the caller's own
    /// copy of the document.
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        Ok(self.db.read().await?.users)
    }

    /// Append a new record. One timestamp is computed up front and used for
    /// both `created_at` and `updated_at`.
    pub async fn create(&self, data: &NewUser) -> Result<UserRecord> {
        let now = now_millis();
        let record = UserRecord {
            id: self.ids.generate(),
            email: normalize_email(&data.email),
            name: normalize_name(&data.name),
            created_at: now,
            updated_at: now,
        };
        let stored = record.clone();
        self.db
            .transaction(move |doc| {
                doc.users.push(record);
                Ok(())
            })
            .await?;
        Ok(stored)
    }

    /// Apply `patch` to the record with `id`, in place. Unspecified fields
    /// keep their prior value; `updated_at` is refreshed. Returns `None`
    /// without touching the document when the id is unknown.
    pub async fn update_by_id(&self, id: &str, patch: &UserPatch) -> Result<Option<UserRecord>> {
        let id = id.to_string();
        let patch = patch.clone();
        self.db
            .transaction(move |doc| {
                let Some(user) = doc.users.iter_mut().find(|u| u.id == id) else {
                    return Ok(None);
                };
                if let Some(email) = &patch.email {
                    user.email = normalize_email(email);
                }
                if let Some(name) = &patch.name {
                    user.name = normalize_name(name);
                }
                user.updated_at = now_millis();
                Ok(Some(user.clone()))
            })
            .await
    }

    /// Remove the record with `id`. Returns whether anything was removed,
    /// so callers can tell "deleted" from "nothing to delete".
    pub async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.db
            .transaction(move |doc| {
                let before = doc.users.len();
                doc.users.retain(|u| u.id != id);
                Ok(doc.users.len() != before)
            })
            .await
    }
}

impl std::fmt::Debug for UserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRepository")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
