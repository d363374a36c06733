use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn has_terms(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Terms)
}

pub fn get_terms(env: &Env) -> Result<SaleTerms, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(Error::NotInitialized)
}

pub fn set_terms(env: &Env, terms: &SaleTerms) {
    env.storage().instance().set(&DataKey::Terms, terms);
}

pub fn get_status(env: &Env) -> Result<SaleStatus, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .ok_or(Error::NotInitialized)
}

pub fn set_status(env: &Env, status: &SaleStatus) {
    env.storage().instance().set(&DataKey::Status, status);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn get_buyer(env: &Env, buyer: &Address) -> BuyerPosition {
    env.storage()
        .persistent()
        .get(&DataKey::Buyer(buyer.clone()))
        .unwrap_or(BuyerPosition {
            amount: 0,
            claimed: 0,
            participated: false,
        })
}

pub fn set_buyer(env: &Env, buyer: &Address, position: &BuyerPosition) {
    env.storage()
        .persistent()
        .set(&DataKey::Buyer(buyer.clone()), position);
}

pub fn get_nonce(env: &Env, buyer: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Nonce(buyer.clone()))
        .unwrap_or(0)
}

/// A quote must present the buyer's current nonce exactly.
pub fn verify_nonce(env: &Env, buyer: &Address, presented: u64) -> Result<(), Error> {
    if get_nonce(env, buyer) != presented {
        return Err(Error::NonceMismatch);
    }
    Ok(())
}

/// Advances the buyer's nonce by exactly one. Called only from the purchase
/// path, after validation and before any external effect.
pub fn advance_nonce(env: &Env, buyer: &Address) -> Result<(), Error> {
    let next = get_nonce(env, buyer)
        .checked_add(1)
        .ok_or(Error::MathOverflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::Nonce(buyer.clone()), &next);
    Ok(())
}

pub fn get_raised(env: &Env, currency: &PaymentCurrency) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Raised(currency.clone()))
        .unwrap_or(0)
}

pub fn add_raised(env: &Env, currency: &PaymentCurrency, amount: i128) -> Result<(), Error> {
    let total = get_raised(env, currency)
        .checked_add(amount)
        .ok_or(Error::MathOverflow)?;
    env.storage()
        .persistent()
        .set(&DataKey::Raised(currency.clone()), &total);
    Ok(())
}

/// Per-instance mutual exclusion for public operations. Acquired before any
/// external transfer; a failed operation rolls the flag back with the rest
/// of its writes, so every exit path releases it.
pub fn acquire_op_lock(env: &Env) -> Result<(), Error> {
    if env
        .storage()
        .instance()
        .get(&DataKey::OpLock)
        .unwrap_or(false)
    {
        return Err(Error::Reentrancy);
    }
    env.storage().instance().set(&DataKey::OpLock, &true);
    Ok(())
}

pub fn release_op_lock(env: &Env) {
    env.storage().instance().remove(&DataKey::OpLock);
}
