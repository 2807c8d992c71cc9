//! Types shared by the ecopoint services.
//!
//! - [`types`]: account enums stored by the account domain and sent over the wire
//! - [`rpc`]: the status envelope every RPC failure is reported with
//! - [`account`] and [`collecting`]: request/response messages of the two backend contracts

pub mod account;
pub mod collecting;
pub mod rpc;
pub mod types;

pub use rpc::{Empty, RpcCode, RpcStatus};
pub use types::{ParseEnumError, Platform, Role};
