//! On-chain DID registry: ownership of DID strings plus revocable,
//! height-bounded claims attached by the current owner.

pub mod contract;
mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
