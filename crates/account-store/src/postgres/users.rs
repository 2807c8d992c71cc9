use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::{Database, Result, SqlParam, User, UserRepository};

const UPSERT_USER: &str = r#"
    INSERT INTO users (user_id, email, phone, display_name, avatar_url)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (user_id) DO UPDATE SET
        email = EXCLUDED.email,
        phone = EXCLUDED.phone,
        display_name = EXCLUDED.display_name,
        avatar_url = EXCLUDED.avatar_url
"#;

const SELECT_USER: &str = r#"
    SELECT user_id, email, phone, display_name, avatar_url
    FROM users
    WHERE user_id = $1
"#;

/// User profiles in the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    db: Database,
}

impl PgUserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        Ok(User {
            user_id: row.try_get("user_id")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            display_name: row.try_get("display_name")?,
            avatar_url: row.try_get("avatar_url")?,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[tracing::instrument(skip(self, user), fields(user_id = %user.user_id))]
    async fn upsert_user(&self, user: &User) -> Result<()> {
        let params = [
            SqlParam::text(user.user_id.as_str()),
            SqlParam::from(user.email.clone()),
            SqlParam::from(user.phone.clone()),
            SqlParam::from(user.display_name.clone()),
            SqlParam::from(user.avatar_url.clone()),
        ];
        self.db.execute(UPSERT_USER, &params).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let rows = self.db.query(SELECT_USER, &[SqlParam::from(user_id)]).await?;
        rows.first().map(Self::row_to_user).transpose()
    }
}
