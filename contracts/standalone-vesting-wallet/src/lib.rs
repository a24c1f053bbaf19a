pub mod contract;
pub mod error;
pub mod msg;
#[cfg(test)]
mod multitest;
pub mod state;

pub use crate::error::ContractError;
