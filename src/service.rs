//! Use-case layer: business rules on top of the repository.
//!
//! Each use case is pure orchestration — a lookup or two plus a single
//! repository call. The only effectful step is the final repository
//! transaction, so a failure at any point leaves no partial state. The
//! lookup and the repository's own transaction are *not* atomic end-to-end;
//! a concurrent writer can slip between them. That race is accepted for a
//! single-file store of this size.

use crate::error::{Error, Result};
use crate::model::{NewUser, UserPatch, UserRecord};
use crate::repo::UserRepository;
use serde_json::json;

/// Application-level user operations, translating absence and conflicts
/// into typed failures.
#[derive(Debug)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Wrap a repository.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Create a user, failing with `Conflict(EmailAlreadyExists)` when the
    /// normalized email is already taken.
    pub async fn create_user(&self, input: NewUser) -> Result<UserRecord> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(Error::conflict(
                "EmailAlreadyExists",
                "Email already exists",
                json!({ "email": input.email }),
            ));
        }
        self.repo.create(&input).await
    }

    /// Look up a user by id, failing with `NotFound(UserNotFound)` when absent.
    pub async fn get_user_by_id(&self, id: &str) -> Result<UserRecord> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("UserNotFound", "User not found", json!({ "id": id })))
    }

    /// Look up a user by email, failing with `NotFound(UserNotFound)` when absent.
    pub async fn get_user_by_email(&self, email: &str) -> Result<UserRecord> {
        self.repo.find_by_email(email).await?.ok_or_else(|| {
            Error::not_found("UserNotFound", "User not found", json!({ "email": email }))
        })
    }

    /// All users, preserving store order.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.repo.list().await
    }

    /// Patch a user. A patched email may not belong to a *different* record;
    /// updating a user to its own current email is not a conflict.
    pub async fn update_user(&self, id: &str, patch: UserPatch) -> Result<UserRecord> {
        if let Some(email) = &patch.email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(Error::conflict(
                        "EmailAlreadyExists",
                        "Email already exists",
                        json!({ "email": email }),
                    ));
                }
            }
        }
        self.repo
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found("UserNotFound", "User not found", json!({ "id": id })))
    }

    /// Delete a user, failing with `NotFound(UserNotFound)` when there was
    /// nothing to delete.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        if self.repo.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(Error::not_found(
                "UserNotFound",
                "User not found",
                json!({ "id": id }),
            ))
        }
    }
}
