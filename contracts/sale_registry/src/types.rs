use soroban_sdk::{contracttype, Address, BytesN};
use token_sale::PaymentCurrency;

/// Platform-wide configuration, set once at initialization. The signer,
/// treasury, and fee are rotatable by the admin; the native-token address is
/// fixed for the deployment.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PlatformConfig {
    pub admin: Address,
    pub quote_signer: BytesN<65>, // uncompressed secp256k1 public key
    pub treasury: Address,
    pub fee_bps: u32, // proceeds fee, basis points of the withdrawn balance
    pub native_token: Address,
}

/// Discovery mirror of one registered sale. Counters are written only
/// through the identity-checked hook endpoints, so they track the sale's own
/// ledger exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleRecord {
    pub id: u64,
    pub sale: Address,
    pub project_owner: Address,
    pub token: Address,
    pub currency: PaymentCurrency,
    pub start_time: u64,
    pub end_time: u64, // scheduled close; the early-end latch shows in `ended_early`
    pub hard_cap: i128,
    pub registered_at: u64,
    pub participants: u32,
    pub sold: i128,
    pub raised: i128,
    pub claimed: i128,
    pub ended_early: bool,
    pub proceeds_withdrawn: bool,
    pub proceeds_net: i128,
    pub proceeds_fee: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    SaleCount,
    SaleAddr(u64),
    SaleId(Address),
    Record(u64),
    UserSales(Address),
    TokenAllowed(Address),
}
