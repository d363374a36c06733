use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    SaleNotRegistered = 4,
    AlreadyRegistered = 5,
    RegistryMismatch = 6,
    CurrencyNotAllowed = 7,
    InvalidConfig = 8,
    TermsUnavailable = 9,
    MathOverflow = 10,
}
