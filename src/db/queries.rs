/// SQL query functions for the preferences table

use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use chrono::Utc;

impl Database {
    /// Get a preference value
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let pref = sqlx::query_as::<_, Preference>("SELECT * FROM preferences WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(pref.map(|p| p.value))
    }

    /// Upsert a batch of preferences atomically
    ///
    /// Either every value lands or none do.
    pub async fn apply_preferences(&self, values: &[(String, String)]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool().begin().await?;

        for (key, value) in values {
            sqlx::query("INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?, ?, ?)")
                .bind(key)
                .bind(value)
                .bind(&now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[tokio::test]
    async fn test_preferences() {
        let db = Database::new_test().await.unwrap();

        db.apply_preferences(&[pair("test_key", "test_value")]).await.unwrap();

        let value = db.get_preference("test_key").await.unwrap();
        assert_eq!(value, Some("test_value".to_string()));
    }

    #[tokio::test]
    async fn test_overwrite_preference() {
        let db = Database::new_test().await.unwrap();

        db.apply_preferences(&[pair("k", "one")]).await.unwrap();
        db.apply_preferences(&[pair("k", "two")]).await.unwrap();

        assert_eq!(db.get_preference("k").await.unwrap(), Some("two".to_string()));
        assert_eq!(db.stats().await.unwrap().total_preferences, 1);
    }

    #[tokio::test]
    async fn test_missing_preference() {
        let db = Database::new_test().await.unwrap();
        assert_eq!(db.get_preference("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_apply_preferences_batch() {
        let db = Database::new_test().await.unwrap();

        db.apply_preferences(&[pair("a", "1"), pair("b", "2")])
            .await
            .unwrap();

        assert_eq!(db.get_preference("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(db.get_preference("b").await.unwrap(), Some("2".to_string()));
        assert_eq!(db.stats().await.unwrap().total_preferences, 2);
    }
}
