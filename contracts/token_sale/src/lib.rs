#![no_std]

//! # Quote-Authorized Token Sale
//!
//! Per-sale accounting engine: purchases are authorized by off-chain signed
//! price quotes, a hard cap can end the sale early, and purchased tokens
//! vest linearly from the sale's effective end. Proceeds are withdrawn once
//! by the project owner, fee-split with the platform treasury configured on
//! the registry.

mod contract;
mod errors;
mod events;
mod quote;
mod registry;
mod storage;
mod types;
mod vesting;


pub use contract::{TokenSaleContract, TokenSaleContractClient};
pub use errors::Error;
pub use registry::{RegistryClient, RegistryInterface};
pub use types::{BuyerPosition, PaymentCurrency, PurchaseQuote, SaleState, SaleStatus, SaleTerms};
