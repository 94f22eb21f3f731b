use crate::entities::{dao::UserRecord, from_db_time, SqliteStore};
use std::future::Future;

pub trait UserStore: Send + Sync + 'static {
    fn find_user(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, sqlx::Error>> + Send;
}

impl UserStore for SqliteStore {
    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let row: Option<(String, Option<String>, Option<String>, String, String)> =
            sqlx::query_as(
                "SELECT id, email, name, created_at, updated_at FROM users WHERE id = ?1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(id, email, name, created_at, updated_at)| UserRecord {
            id,
            email,
            name,
            created_at: from_db_time(&created_at, "users.created_at"),
            updated_at: from_db_time(&updated_at, "users.updated_at"),
        }))
    }
}

// Registration lives outside this service; tests seed users directly.
#[cfg(test)]
impl SqliteStore {
    pub async fn insert_user(&self, user: &UserRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (id, email, name, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(crate::entities::to_db_time(&user.created_at))
        .bind(crate::entities::to_db_time(&user.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::Utc;

    pub fn user(id: &str, name: Option<&str>, email: Option<&str>) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: id.to_owned(),
            email: email.map(str::to_owned),
            name: name.map(str::to_owned),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::user;
    use super::*;

    #[tokio::test]
    async fn find_user_returns_seeded_row() {
        let store = SqliteStore::in_memory().await;
        store
            .insert_user(&user("u1", Some("Ada"), Some("ada@example.com")))
            .await
            .unwrap();

        let found = store.find_user("u1").await.unwrap().unwrap();
        assert_eq!(found.name.as_deref(), Some("Ada"));
        assert_eq!(found.email.as_deref(), Some("ada@example.com"));
        assert!(store.find_user("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn email_is_unique_when_present() {
        let store = SqliteStore::in_memory().await;
        store.insert_user(&user("a", None, Some("x@example.com"))).await.unwrap();
        assert!(store.insert_user(&user("b", None, Some("x@example.com"))).await.is_err());

        // NULL emails never collide.
        store.insert_user(&user("c", None, None)).await.unwrap();
        store.insert_user(&user("d", None, None)).await.unwrap();
    }
}
