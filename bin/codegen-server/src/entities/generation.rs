use crate::entities::dao::{GenerationRecord, HistoryEntry, UserSummary};
use crate::entities::{from_db_time, to_db_time, SqliteStore};
use std::future::Future;

pub trait GenerationStore: Send + Sync + 'static {
    fn insert_generation(
        &self,
        record: GenerationRecord,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Number of generations, optionally restricted to one language.
    fn count_generations(
        &self,
        language: Option<&str>,
    ) -> impl Future<Output = Result<i64, sqlx::Error>> + Send;

    /// A window of generations ordered newest first, owners joined.
    fn list_generations(
        &self,
        language: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<Vec<HistoryEntry>, sqlx::Error>> + Send;
}

type HistoryRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl GenerationStore for SqliteStore {
    async fn insert_generation(&self, record: GenerationRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO generations (id, prompt, language, code, user_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.prompt)
        .bind(&record.language)
        .bind(&record.code)
        .bind(&record.user_id)
        .bind(to_db_time(&record.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_generations(&self, language: Option<&str>) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM generations WHERE (?1 IS NULL OR language = ?1)",
        )
        .bind(language)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn list_generations(
        &self,
        language: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            "SELECT g.id, g.prompt, g.language, g.code, g.user_id, g.created_at, \
                    u.id, u.name, u.email \
             FROM generations g \
             LEFT JOIN users u ON u.id = g.user_id \
             WHERE (?1 IS NULL OR g.language = ?1) \
             ORDER BY g.created_at DESC, g.id DESC \
             LIMIT ?2 OFFSET ?3",
        )
        .bind(language)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, prompt, language, code, user_id, created_at, owner_id, owner_name, owner_email)| {
                    HistoryEntry {
                        generation: GenerationRecord {
                            id,
                            prompt,
                            language,
                            code,
                            user_id,
                            created_at: from_db_time(&created_at, "generations.created_at"),
                        },
                        owner: owner_id.map(|id| UserSummary {
                            id,
                            name: owner_name,
                            email: owner_email,
                        }),
                    }
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::test_support::user;
    use chrono::{Duration, TimeZone, Utc};

    fn record(id: &str, language: &str, minutes: i64, user_id: Option<&str>) -> GenerationRecord {
        GenerationRecord {
            id: id.to_owned(),
            prompt: format!("prompt {id}"),
            language: language.to_owned(),
            code: format!("code {id}"),
            user_id: user_id.map(str::to_owned),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn lists_newest_first_with_offset() {
        let store = SqliteStore::in_memory().await;
        for i in 0..5 {
            store
                .insert_generation(record(&format!("g{i}"), "Python", i, None))
                .await
                .unwrap();
        }

        let page = store.list_generations(None, 2, 1).await.unwrap();
        let ids: Vec<_> = page.iter().map(|e| e.generation.id.as_str()).collect();
        assert_eq!(ids, ["g3", "g2"]);
        assert_eq!(store.count_generations(None).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn language_filter_applies_to_count_and_list() {
        let store = SqliteStore::in_memory().await;
        store.insert_generation(record("a", "Python", 0, None)).await.unwrap();
        store.insert_generation(record("b", "C++", 1, None)).await.unwrap();
        store.insert_generation(record("c", "C++", 2, None)).await.unwrap();

        assert_eq!(store.count_generations(Some("C++")).await.unwrap(), 2);
        assert_eq!(store.count_generations(Some("Rust")).await.unwrap(), 0);
        let rows = store.list_generations(Some("C++"), 10, 0).await.unwrap();
        assert!(rows.iter().all(|e| e.generation.language == "C++"));
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn joins_owner_when_present() {
        let store = SqliteStore::in_memory().await;
        store
            .insert_user(&user("u1", Some("Grace"), Some("grace@example.com")))
            .await
            .unwrap();
        store.insert_generation(record("owned", "TypeScript", 1, Some("u1"))).await.unwrap();
        store.insert_generation(record("anon", "TypeScript", 0, None)).await.unwrap();

        let rows = store.list_generations(None, 10, 0).await.unwrap();
        assert_eq!(
            rows[0].owner,
            Some(UserSummary {
                id: "u1".into(),
                name: Some("Grace".into()),
                email: Some("grace@example.com".into()),
            })
        );
        assert_eq!(rows[1].owner, None);
    }

    #[tokio::test]
    async fn unknown_owner_and_language_are_rejected() {
        let store = SqliteStore::in_memory().await;
        assert!(store
            .insert_generation(record("x", "Python", 0, Some("ghost")))
            .await
            .is_err());
        assert!(store.insert_generation(record("y", "Rust", 0, None)).await.is_err());
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_to_generations() {
        let store = SqliteStore::in_memory().await;
        store.insert_user(&user("u1", None, None)).await.unwrap();
        store.insert_generation(record("g", "JavaScript", 0, Some("u1"))).await.unwrap();
        store.insert_generation(record("h", "JavaScript", 1, None)).await.unwrap();

        store.delete_user("u1").await.unwrap();
        let rows = store.list_generations(None, 10, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].generation.id, "h");
    }

    #[tokio::test]
    async fn timestamps_round_trip() {
        let store = SqliteStore::in_memory().await;
        let original = record("t", "Python", 42, None);
        store.insert_generation(original.clone()).await.unwrap();
        let rows = store.list_generations(None, 1, 0).await.unwrap();
        assert_eq!(rows[0].generation.created_at, original.created_at);
    }
}
