use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use uuid::Uuid;

use crate::services::store::client::{
    Collection, Document, DocumentStore, StoreError, StoreResult, strip_id, with_id,
};

/// PostgreSQL-backed document store.
///
/// All collections share the `documents` table; bodies are JSONB and filters
/// use containment (`@>`), which is top-level equality for the flat filters
/// the repos build.
#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    // Connect and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        // 23505 = unique_violation (user email index)
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return StoreError::Conflict;
        }
        StoreError::Query(e.to_string())
    }
}

type DocRow = (Uuid, Json<Document>);

fn into_documents(rows: Vec<DocRow>) -> Vec<Document> {
    rows.into_iter()
        .map(|(id, Json(body))| with_id(id, body))
        .collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocRow>(
            r#"
            SELECT id, doc
            FROM documents
            WHERE collection = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_documents(rows))
    }

    async fn find_by(
        &self,
        collection: Collection,
        filter: &Document,
    ) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocRow>(
            r#"
            SELECT id, doc
            FROM documents
            WHERE collection = $1 AND doc @> $2
            ORDER BY created_at, id
            "#,
        )
        .bind(collection.name())
        .bind(Json(filter.clone()))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_documents(rows))
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocRow>(
            r#"
            SELECT id, doc
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, Json(body))| with_id(id, body)))
    }

    async fn insert(&self, collection: Collection, doc: Document) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, doc)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(strip_id(doc)))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: Uuid,
        partial: Document,
    ) -> StoreResult<u64> {
        // jsonb `||` replaces top-level keys, i.e. `$set` semantics
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET doc = doc || $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(strip_id(partial)))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

// Run with a scratch database:
// DATABASE_URL=postgres://... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::client::{ID_FIELD, filter_eq};
    use serde_json::{Value, json};

    async fn store() -> PgDocumentStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
        PgDocumentStore::connect(&url, 2).await.unwrap()
    }

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    // Unique per run so repeated runs against one database do not collide.
    fn email(tag: &str) -> String {
        format!("{tag}-{}@yoga.io", Uuid::new_v4())
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn find_by_matches_top_level_fields() {
        let store = store().await;
        let owner = email("cart");
        store
            .insert(Collection::Carts, doc(json!({"email": owner, "classId": "c-1"})))
            .await
            .unwrap();
        store
            .insert(Collection::Carts, doc(json!({"email": owner, "classId": "c-2"})))
            .await
            .unwrap();
        store
            .insert(Collection::Carts, doc(json!({"email": email("other"), "classId": "c-1"})))
            .await
            .unwrap();

        let mine = store
            .find_by(Collection::Carts, &filter_eq("email", owner.as_str()))
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|d| d.contains_key(ID_FIELD)));

        // same body in another collection is not visible
        let users = store
            .find_by(Collection::Users, &filter_eq("email", owner.as_str()))
            .await
            .unwrap();
        assert!(users.is_empty());

        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn update_merges_top_level_keys() {
        let store = store().await;
        let id = store
            .insert(
                Collection::Users,
                doc(json!({"email": email("user"), "name": "Ana"})),
            )
            .await
            .unwrap();

        let matched = store
            .update_by_id(Collection::Users, id, doc(json!({"role": "admin"})))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let stored = store.find_by_id(Collection::Users, id).await.unwrap().unwrap();
        assert_eq!(stored["name"], json!("Ana"));
        assert_eq!(stored["role"], json!("admin"));
        assert_eq!(stored[ID_FIELD], json!(id.to_string()));

        let matched = store
            .update_by_id(Collection::Users, Uuid::new_v4(), doc(json!({"role": "admin"})))
            .await
            .unwrap();
        assert_eq!(matched, 0);

        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_reports_removed_count() {
        let store = store().await;
        let id = store
            .insert(Collection::Carts, doc(json!({"email": email("cart")})))
            .await
            .unwrap();

        assert_eq!(store.delete_by_id(Collection::Carts, id).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(Collection::Carts, id).await.unwrap(), 0);
        assert!(store.find_by_id(Collection::Carts, id).await.unwrap().is_none());

        store.close().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn duplicate_user_email_is_a_conflict() {
        let store = store().await;
        let address = email("dup");
        store
            .insert(Collection::Users, doc(json!({"email": address})))
            .await
            .unwrap();

        let second = store
            .insert(Collection::Users, doc(json!({"email": address})))
            .await;
        assert!(matches!(second, Err(StoreError::Conflict)));

        // the email index only covers users
        store
            .insert(Collection::Carts, doc(json!({"email": address})))
            .await
            .unwrap();

        store.close().await;
    }
}
