/*
 * Responsibility
 * - operations on the `user` collection
 * - insert-if-absent keyed by email, role promotion, role lookup
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{decode, decode_all, encode, error::RepoError};
use crate::services::store::{Collection, Document, DocumentStore, client::filter_eq};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    // name, photo, ... as posted at sign-in
    #[serde(flatten)]
    pub profile: Document,
}

#[derive(Debug, Serialize)]
struct NewUserDoc<'a> {
    email: &'a str,
    #[serde(flatten)]
    profile: &'a Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Uuid),
    AlreadyExists,
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<UserRow>, RepoError> {
    let docs = store.find_all(Collection::Users).await?;
    decode_all(docs)
}

pub async fn find_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<UserRow>, RepoError> {
    let docs = store
        .find_by(Collection::Users, &filter_eq("email", email))
        .await?;

    docs.into_iter().next().map(decode).transpose()
}

/// Insert a user unless one with the same email already exists.
///
/// `role` is never taken from the sign-in payload; promotion goes through
/// `set_role`.
pub async fn create_if_absent(
    store: &dyn DocumentStore,
    email: &str,
    profile: &Document,
) -> Result<CreateOutcome, RepoError> {
    if find_by_email(store, email).await?.is_some() {
        return Ok(CreateOutcome::AlreadyExists);
    }

    let mut profile = profile.clone();
    for key in ["_id", "email", "role"] {
        profile.remove(key);
    }
    let doc = encode(&NewUserDoc {
        email,
        profile: &profile,
    })?;

    match store.insert(Collection::Users, doc).await {
        Ok(id) => Ok(CreateOutcome::Created(id)),
        // lost a race against a concurrent sign-in with the same email
        Err(e) => match RepoError::from(e) {
            RepoError::Conflict => Ok(CreateOutcome::AlreadyExists),
            other => Err(other),
        },
    }
}

pub async fn set_role(
    store: &dyn DocumentStore,
    user_id: Uuid,
    role: Role,
) -> Result<u64, RepoError> {
    let matched = store
        .update_by_id(Collection::Users, user_id, filter_eq("role", role.as_str()))
        .await?;

    Ok(matched)
}

pub async fn delete(store: &dyn DocumentStore, user_id: Uuid) -> Result<u64, RepoError> {
    Ok(store.delete_by_id(Collection::Users, user_id).await?)
}

/// Stored role of the user with `email`; `None` when unset or unknown.
pub async fn role_of(store: &dyn DocumentStore, email: &str) -> Result<Option<Role>, RepoError> {
    Ok(find_by_email(store, email).await?.and_then(|u| u.role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::{MemoryStore, StoreError, client::StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    /// Sees no user on lookup, then loses the insert to a concurrent sign-in.
    struct LateDuplicateStore;

    #[async_trait]
    impl DocumentStore for LateDuplicateStore {
        fn backend_name(&self) -> &'static str {
            "late-duplicate"
        }

        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }

        async fn find_all(&self, _: Collection) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_by(&self, _: Collection, _: &Document) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _: Collection, _: Uuid) -> StoreResult<Option<Document>> {
            Ok(None)
        }

        async fn insert(&self, _: Collection, _: Document) -> StoreResult<Uuid> {
            Err(StoreError::Conflict)
        }

        async fn update_by_id(&self, _: Collection, _: Uuid, _: Document) -> StoreResult<u64> {
            Ok(0)
        }

        async fn delete_by_id(&self, _: Collection, _: Uuid) -> StoreResult<u64> {
            Ok(0)
        }

        async fn close(&self) {}
    }

    fn profile(name: &str) -> Document {
        json!({"name": name}).as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn second_sign_in_does_not_duplicate() {
        let store = MemoryStore::new();

        let first = create_if_absent(&store, "a@yoga.io", &profile("A"))
            .await
            .unwrap();
        assert!(matches!(first, CreateOutcome::Created(_)));

        let second = create_if_absent(&store, "a@yoga.io", &profile("A again"))
            .await
            .unwrap();
        assert_eq!(second, CreateOutcome::AlreadyExists);

        let users = list(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].profile["name"], json!("A"));
    }

    #[tokio::test]
    async fn posted_role_is_ignored() {
        let store = MemoryStore::new();
        let mut p = profile("Mallory");
        p.insert("role".into(), json!("admin"));

        create_if_absent(&store, "m@yoga.io", &p).await.unwrap();

        assert_eq!(role_of(&store, "m@yoga.io").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_role_promotes_user() {
        let store = MemoryStore::new();
        let CreateOutcome::Created(id) = create_if_absent(&store, "i@yoga.io", &profile("I"))
            .await
            .unwrap()
        else {
            panic!("expected a new user");
        };

        assert_eq!(set_role(&store, id, Role::Instructor).await.unwrap(), 1);
        assert_eq!(
            role_of(&store, "i@yoga.io").await.unwrap(),
            Some(Role::Instructor)
        );

        assert_eq!(set_role(&store, Uuid::new_v4(), Role::Admin).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unique_violation_on_insert_reports_existing_user() {
        let outcome = create_if_absent(&LateDuplicateStore, "race@yoga.io", &profile("R"))
            .await
            .unwrap();

        assert_eq!(outcome, CreateOutcome::AlreadyExists);
    }
}
