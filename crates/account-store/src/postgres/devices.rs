use async_trait::async_trait;
use common::{Platform, Role};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::parse_column;
use crate::{Database, Device, DeviceRepository, Result, SqlParam};

const INSERT_DEVICE: &str = r#"
    INSERT INTO devices (user_id, fcm_token, platform, last_seen_at)
    VALUES ($1, $2, $3, NOW())
"#;

const SELECT_TOKENS_FOR_ROLE: &str = r#"
    SELECT d.fcm_token
    FROM devices d
    JOIN user_roles ur ON ur.user_id = d.user_id
    WHERE ur.role = $1
"#;

const SELECT_DEVICES: &str = r#"
    SELECT id, user_id, fcm_token, platform, last_seen_at
    FROM devices
    WHERE user_id = $1
    ORDER BY id ASC
"#;

/// Push tokens in the `devices` table.
#[derive(Clone)]
pub struct PgDeviceRepository {
    db: Database,
}

impl PgDeviceRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_device(row: &PgRow) -> Result<Device> {
        Ok(Device {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            fcm_token: row.try_get("fcm_token")?,
            platform: parse_column(row, "platform")?,
            last_seen_at: row.try_get("last_seen_at")?,
        })
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    #[tracing::instrument(skip(self, token))]
    async fn upsert_token(&self, user_id: &str, token: &str, platform: Platform) -> Result<()> {
        let params = [
            SqlParam::from(user_id),
            SqlParam::from(token),
            SqlParam::from(platform.as_str()),
        ];
        self.db.execute(INSERT_DEVICE, &params).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_tokens_for_role(&self, role: Role) -> Result<Vec<String>> {
        let rows = self
            .db
            .query(SELECT_TOKENS_FOR_ROLE, &[SqlParam::from(role.as_str())])
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("fcm_token").map_err(Into::into))
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn list_devices(&self, user_id: &str) -> Result<Vec<Device>> {
        let rows = self.db.query(SELECT_DEVICES, &[SqlParam::from(user_id)]).await?;
        rows.iter().map(Self::row_to_device).collect()
    }
}
