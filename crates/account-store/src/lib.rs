//! Persistence for the account domain.
//!
//! [`Database`] is a thin adapter over a pooled PostgreSQL connection. The four
//! repository traits in [`repository`] shape its rows into entities; each has a
//! Postgres implementation in [`postgres`] and all four are implemented by
//! [`InMemoryAccountStore`] for tests and database-less runs.

pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use common::{Platform, Role};
pub use db::{Database, SqlParam};
pub use error::{Result, StoreError};
pub use memory::InMemoryAccountStore;
pub use models::{Address, Device, NewAddress, User};
pub use postgres::{PgAddressRepository, PgDeviceRepository, PgRoleRepository, PgUserRepository};
pub use repository::{AddressRepository, DeviceRepository, RoleRepository, UserRepository};
