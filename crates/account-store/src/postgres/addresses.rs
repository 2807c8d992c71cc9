use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::{Address, AddressRepository, Database, NewAddress, Result, SqlParam};

// Conflicts resolve on addresses_user_full_text_key (user_id, full_text).
const UPSERT_ADDRESS: &str = r#"
    INSERT INTO addresses (user_id, label, full_text, lat, lng, is_default)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT (user_id, full_text) DO UPDATE SET
        label = EXCLUDED.label,
        full_text = EXCLUDED.full_text,
        lat = EXCLUDED.lat,
        lng = EXCLUDED.lng,
        is_default = EXCLUDED.is_default
"#;

const SELECT_ADDRESSES: &str = r#"
    SELECT id, user_id, label, full_text, lat, lng, is_default
    FROM addresses
    WHERE user_id = $1
    ORDER BY id DESC
"#;

/// Addresses in the `addresses` table.
#[derive(Clone)]
pub struct PgAddressRepository {
    db: Database,
}

impl PgAddressRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_address(row: &PgRow) -> Result<Address> {
        Ok(Address {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            label: row.try_get("label")?,
            full_text: row.try_get("full_text")?,
            lat: row.try_get("lat")?,
            lng: row.try_get("lng")?,
            is_default: row.try_get("is_default")?,
        })
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self, user_id: &str) -> Result<Vec<Address>> {
        let rows = self
            .db
            .query(SELECT_ADDRESSES, &[SqlParam::from(user_id)])
            .await?;
        rows.iter().map(Self::row_to_address).collect()
    }

    #[tracing::instrument(skip(self, address), fields(user_id = %address.user_id))]
    async fn upsert(&self, address: &NewAddress) -> Result<()> {
        let params = [
            SqlParam::text(address.user_id.as_str()),
            SqlParam::from(address.label.clone()),
            SqlParam::text(address.full_text.as_str()),
            SqlParam::from(address.lat),
            SqlParam::from(address.lng),
            SqlParam::from(address.is_default),
        ];
        self.db.execute(UPSERT_ADDRESS, &params).await?;
        Ok(())
    }
}
