use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTerms = 3,
    SaleNotStarted = 4,
    SaleEnded = 5,
    SalePaused = 6,
    QuoteExpired = 7,
    NonceMismatch = 8,
    ZeroAmount = 9,
    InvalidRecoveryId = 10,
    SignatureMismatch = 11,
    HardCapExceeded = 12,
    NothingClaimable = 13,
    SaleStillActive = 14,
    AlreadyWithdrawn = 15,
    NoUnsoldTokens = 16,
    Unauthorized = 17,
    Reentrancy = 18,
    MathOverflow = 19,
    LedgerInvariant = 20,
}
