use soroban_sdk::{Address, BytesN, Env};

/// The slice of the registry a sale instance consumes: platform
/// configuration reads plus the accounting hooks. Hooks must succeed; a
/// failing hook fails the operation that triggered it. The registry
/// authenticates hook callers against the address it registered for the
/// sale, so only the sale instance itself can report its own accounting.
#[soroban_sdk::contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn quote_signer(env: Env) -> BytesN<65>;
    fn treasury(env: Env) -> Address;
    fn platform_fee_bps(env: Env) -> u32;
    fn native_token(env: Env) -> Address;
    fn admin(env: Env) -> Address;

    fn on_first_participation(env: Env, sale: Address, buyer: Address);
    fn on_purchase(env: Env, sale: Address, buyer: Address, token_amount: i128, pay_amount: i128);
    fn on_ended_early(env: Env, sale: Address);
    fn on_claim(env: Env, sale: Address, buyer: Address, amount: i128);
    fn on_proceeds_withdrawn(env: Env, sale: Address, net_amount: i128, fee_amount: i128);
}
