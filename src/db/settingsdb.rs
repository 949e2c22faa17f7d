// db/settingsdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::settingsmodel::Setting;

#[async_trait]
pub trait SettingsExt {
    async fn get_settings(&self) -> Result<Vec<Setting>, Error>;

    async fn get_setting(&self, id: &str) -> Result<Option<Setting>, Error>;

    async fn upsert_setting(&self, id: &str, value: &str) -> Result<Setting, Error>;
}

#[async_trait]
impl SettingsExt for DBClient {
    async fn get_settings(&self) -> Result<Vec<Setting>, Error> {
        sqlx::query_as::<_, Setting>(r#"SELECT * FROM settings ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_setting(&self, id: &str) -> Result<Option<Setting>, Error> {
        sqlx::query_as::<_, Setting>(r#"SELECT * FROM settings WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert_setting(&self, id: &str, value: &str) -> Result<Setting, Error> {
        sqlx::query_as::<_, Setting>(
            r#"INSERT INTO settings (id, value)
               VALUES ($1, $2)
               ON CONFLICT (id) DO UPDATE SET value = EXCLUDED.value
               RETURNING *"#,
        )
        .bind(id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
    }
}
