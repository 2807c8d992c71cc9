//! PostgreSQL-backed repositories.

mod addresses;
mod devices;
mod roles;
mod users;

pub use addresses::PgAddressRepository;
pub use devices::PgDeviceRepository;
pub use roles::PgRoleRepository;
pub use users::PgUserRepository;

use std::str::FromStr;

use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::{Result, StoreError};

/// Reads a text column and parses it into `T`.
fn parse_column<T: FromStr>(row: &PgRow, column: &'static str) -> Result<T> {
    let raw: String = row.try_get(column)?;
    raw.parse()
        .map_err(|_| StoreError::InvalidColumn { column, value: raw })
}
