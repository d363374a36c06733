use soroban_sdk::{Address, BytesN, Env};

pub fn registry_initialized(env: &Env, admin: &Address, treasury: &Address, fee_bps: u32) {
    env.events().publish(
        ("registry_initialized",),
        (admin.clone(), treasury.clone(), fee_bps),
    );
}

pub fn sale_registered(env: &Env, id: u64, sale: &Address, project_owner: &Address) {
    env.events().publish(
        ("sale_registered", id),
        (sale.clone(), project_owner.clone()),
    );
}

pub fn quote_signer_rotated(env: &Env, signer: &BytesN<65>) {
    env.events().publish(("quote_signer_rotated",), signer.clone());
}

pub fn treasury_rotated(env: &Env, treasury: &Address) {
    env.events().publish(("treasury_rotated",), treasury.clone());
}

pub fn fee_updated(env: &Env, fee_bps: u32) {
    env.events().publish(("fee_updated",), fee_bps);
}

pub fn payment_token_allowed(env: &Env, token: &Address, allowed: bool) {
    env.events()
        .publish(("payment_token_allowed", token.clone()), allowed);
}
