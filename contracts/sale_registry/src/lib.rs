#![no_std]

//! # Sale Registry
//!
//! Platform half of the token-sale pair: holds the quote-signing identity,
//! treasury, fee, and payment-token whitelist; assigns stable ids to
//! registered sale instances; and mirrors each sale's counters through hook
//! endpoints that only the sale contract itself can call.

mod contract;
mod errors;
mod events;
mod storage;
mod types;


pub use contract::{SaleRegistryContract, SaleRegistryContractClient};
pub use errors::Error;
pub use types::{PlatformConfig, SaleRecord};
