use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env, Vec};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<PlatformConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &PlatformConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_sale_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::SaleCount)
        .unwrap_or(0)
}

pub fn set_sale_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::SaleCount, &count);
}

pub fn get_sale_address(env: &Env, id: u64) -> Result<Address, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::SaleAddr(id))
        .ok_or(Error::SaleNotRegistered)
}

pub fn set_sale_address(env: &Env, id: u64, sale: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::SaleAddr(id), sale);
}

pub fn get_sale_id(env: &Env, sale: &Address) -> Result<u64, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::SaleId(sale.clone()))
        .ok_or(Error::SaleNotRegistered)
}

pub fn is_registered(env: &Env, sale: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::SaleId(sale.clone()))
}

pub fn set_sale_id(env: &Env, sale: &Address, id: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::SaleId(sale.clone()), &id);
}

pub fn get_record(env: &Env, id: u64) -> Result<SaleRecord, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Record(id))
        .ok_or(Error::SaleNotRegistered)
}

pub fn set_record(env: &Env, record: &SaleRecord) {
    env.storage()
        .persistent()
        .set(&DataKey::Record(record.id), record);
}

pub fn get_user_sales(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::UserSales(user.clone()))
        .unwrap_or(Vec::new(env))
}

/// Appends to the user's insertion-ordered sale index.
pub fn push_user_sale(env: &Env, user: &Address, id: u64) {
    let mut ids = get_user_sales(env, user);
    ids.push_back(id);
    env.storage()
        .persistent()
        .set(&DataKey::UserSales(user.clone()), &ids);
}

pub fn is_token_allowed(env: &Env, token: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::TokenAllowed(token.clone()))
        .unwrap_or(false)
}

pub fn set_token_allowed(env: &Env, token: &Address, allowed: bool) {
    if allowed {
        env.storage()
            .persistent()
            .set(&DataKey::TokenAllowed(token.clone()), &true);
    } else {
        env.storage()
            .persistent()
            .remove(&DataKey::TokenAllowed(token.clone()));
    }
}
