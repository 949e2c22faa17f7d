// db/staffdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::staffmodel::{StaffProfile, StaffRole};

#[async_trait]
pub trait StaffExt {
    async fn get_staff_profile(&self, staff_id: Uuid) -> Result<Option<StaffProfile>, Error>;

    async fn list_staff_profiles(&self) -> Result<Vec<StaffProfile>, Error>;

    async fn update_staff_profile(
        &self,
        staff_id: Uuid,
        role: StaffRole,
        window_number: Option<i32>,
        is_active: bool,
    ) -> Result<StaffProfile, Error>;
}

#[async_trait]
impl StaffExt for DBClient {
    async fn get_staff_profile(&self, staff_id: Uuid) -> Result<Option<StaffProfile>, Error> {
        sqlx::query_as::<_, StaffProfile>(r#"SELECT * FROM staff_profiles WHERE id = $1"#)
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_staff_profiles(&self) -> Result<Vec<StaffProfile>, Error> {
        sqlx::query_as::<_, StaffProfile>(
            r#"SELECT * FROM staff_profiles ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn update_staff_profile(
        &self,
        staff_id: Uuid,
        role: StaffRole,
        window_number: Option<i32>,
        is_active: bool,
    ) -> Result<StaffProfile, Error> {
        sqlx::query_as::<_, StaffProfile>(
            r#"UPDATE staff_profiles
               SET role = $2, window_number = $3, is_active = $4
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(staff_id)
        .bind(role)
        .bind(window_number)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }
}
