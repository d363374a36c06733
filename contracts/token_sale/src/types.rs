use soroban_sdk::{contracttype, Address, Env};

/// Payment currency accepted by a sale: the native asset (resolved through
/// the registry's configured Stellar Asset Contract) or a specific token.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum PaymentCurrency {
    Native,
    Token(Address),
}

/// Immutable sale terms, fixed at initialization and never mutated.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleTerms {
    pub token: Address,             // token being sold
    pub currency: PaymentCurrency,  // accepted payment currency
    pub start_time: u64,            // purchase window open (inclusive)
    pub end_time: u64,              // scheduled close (exclusive)
    pub vesting_duration: u64,      // seconds of linear vesting after the end
    pub hard_cap: i128,             // max cumulative tokens sold
    pub discount_bps: u32,          // pricing discount applied by the quote signer
    pub project_owner: Address,
    pub registry: Address,
}

/// Mutable sale status. `end_time` starts equal to the scheduled close and
/// only ever moves earlier, when the hard cap ends the sale.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleStatus {
    pub ended_early: bool,
    pub end_time: u64,
    pub proceeds_withdrawn: bool,
    pub sold_tokens: i128,
    pub buyers_count: u32,
    pub total_claimed: i128,
}

/// Per-buyer ledger entry, created on first purchase and never removed.
/// `claimed <= amount` always; both only ever grow.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct BuyerPosition {
    pub amount: i128,  // cumulative tokens purchased
    pub claimed: i128, // cumulative tokens released
    pub participated: bool,
}

/// Off-chain signed purchase authorization. The digest that gets signed also
/// binds the network id, the sale address, and the sale's payment currency,
/// so a quote can never be replayed across networks, sales, or currencies.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PurchaseQuote {
    pub buyer: Address,
    pub pay_amount: i128,   // payment units collected from the buyer
    pub token_amount: i128, // sale tokens allocated
    pub expires_at: u64,    // inclusive expiry timestamp
    pub nonce: u64,         // buyer's current nonce, exactly
}

/// Observable lifecycle of a sale instance. `Ended` / `EndedEarly` are only
/// visible at the exact end instant; afterwards the state reads as the
/// vesting refinement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleState {
    Scheduled,
    Active,
    Ended,
    EndedEarly,
    Vesting,
    FullyVested,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Terms,
    Status,
    Paused,
    OpLock,
    Buyer(Address),
    Nonce(Address),
    Raised(PaymentCurrency),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
