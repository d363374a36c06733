use soroban_sdk::{Address, Env};

use crate::types::PaymentCurrency;

pub fn sale_initialized(env: &Env, project_owner: &Address, token: &Address, hard_cap: i128) {
    env.events().publish(
        ("sale_initialized",),
        (project_owner.clone(), token.clone(), hard_cap),
    );
}

pub fn purchase(env: &Env, buyer: &Address, token_amount: i128, pay_amount: i128, nonce: u64) {
    env.events().publish(
        ("purchase", buyer.clone()),
        (token_amount, pay_amount, nonce),
    );
}

pub fn ended_early(env: &Env, end_time: u64, sold_tokens: i128) {
    env.events()
        .publish(("sale_ended_early",), (end_time, sold_tokens));
}

pub fn claim(env: &Env, buyer: &Address, amount: i128) {
    env.events().publish(("tokens_claimed", buyer.clone()), amount);
}

pub fn proceeds_withdrawn(env: &Env, currency: &PaymentCurrency, net: i128, fee: i128) {
    env.events()
        .publish(("proceeds_withdrawn",), (currency.clone(), net, fee));
}

pub fn unsold_withdrawn(env: &Env, to: &Address, amount: i128) {
    env.events().publish(("unsold_withdrawn",), (to.clone(), amount));
}

pub fn emergency_withdrawal(env: &Env, asset: &Address, to: &Address, amount: i128) {
    env.events().publish(
        ("emergency_withdrawal",),
        (asset.clone(), to.clone(), amount),
    );
}

pub fn paused(env: &Env, paused: bool) {
    env.events().publish(("sale_paused",), paused);
}
