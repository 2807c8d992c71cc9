use async_trait::async_trait;
use common::Role;

use super::parse_column;
use crate::{Database, Result, RoleRepository, SqlParam};

const SET_ROLE: &str = r#"
    INSERT INTO user_roles (user_id, role)
    VALUES ($1, $2)
    ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
"#;

const SELECT_ROLES: &str = "SELECT role FROM user_roles WHERE user_id = $1";

/// Role assignments in the `user_roles` table.
#[derive(Clone)]
pub struct PgRoleRepository {
    db: Database,
}

impl PgRoleRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[tracing::instrument(skip(self))]
    async fn set_role(&self, user_id: &str, role: Role) -> Result<()> {
        let params = [SqlParam::from(user_id), SqlParam::from(role.as_str())];
        self.db.execute(SET_ROLE, &params).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list_roles(&self, user_id: &str) -> Result<Vec<Role>> {
        let rows = self.db.query(SELECT_ROLES, &[SqlParam::from(user_id)]).await?;
        rows.iter().map(|row| parse_column(row, "role")).collect()
    }
}
