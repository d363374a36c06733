use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, BytesN, Env};

use crate::errors::Error;
use crate::events;
use crate::quote;
use crate::registry::RegistryClient;
use crate::storage;
use crate::types::*;
use crate::vesting;

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Quote-Authorized Token Sale with Linear Vesting"
);

#[contract]
pub struct TokenSaleContract;

#[contractimpl]
impl TokenSaleContract {
    /// Initialize the sale instance with its immutable terms.
    pub fn initialize(env: Env, terms: SaleTerms) -> Result<(), Error> {
        if storage::has_terms(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if terms.end_time <= terms.start_time
            || terms.hard_cap <= 0
            || terms.discount_bps > 10_000
        {
            return Err(Error::InvalidTerms);
        }

        storage::set_terms(&env, &terms);
        storage::set_status(
            &env,
            &SaleStatus {
                ended_early: false,
                end_time: terms.end_time,
                proceeds_withdrawn: false,
                sold_tokens: 0,
                buyers_count: 0,
                total_claimed: 0,
            },
        );

        events::sale_initialized(&env, &terms.project_owner, &terms.token, terms.hard_cap);
        Ok(())
    }

    /// Purchase against an off-chain signed quote.
    ///
    /// The quote must carry the buyer's current nonce exactly and be signed
    /// by the registry-configured authorizing identity over the digest in
    /// `quote_digest`. Payment is pulled from the buyer in the sale's
    /// configured currency. Landing exactly on the hard cap ends the sale
    /// immediately.
    pub fn buy_with_quote(
        env: Env,
        quote: PurchaseQuote,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Result<(), Error> {
        quote.buyer.require_auth();
        storage::acquire_op_lock(&env)?;

        let terms = storage::get_terms(&env)?;
        let mut status = storage::get_status(&env)?;
        if storage::is_paused(&env) {
            return Err(Error::SalePaused);
        }

        let now = get_ledger_timestamp(&env);
        if now < terms.start_time {
            return Err(Error::SaleNotStarted);
        }
        if status.ended_early || now >= status.end_time {
            return Err(Error::SaleEnded);
        }
        if now > quote.expires_at {
            return Err(Error::QuoteExpired);
        }
        storage::verify_nonce(&env, &quote.buyer, quote.nonce)?;
        if quote.token_amount <= 0 || quote.pay_amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        let sale = env.current_contract_address();
        let registry = RegistryClient::new(&env, &terms.registry);

        let digest = quote::digest(&env, &sale, &terms.currency, &quote);
        let recovered = quote::recover_signer(&env, &digest, &signature, recovery_id)?;
        if recovered != registry.quote_signer() {
            return Err(Error::SignatureMismatch);
        }

        let new_sold = status
            .sold_tokens
            .checked_add(quote.token_amount)
            .ok_or(Error::MathOverflow)?;
        if new_sold > terms.hard_cap {
            return Err(Error::HardCapExceeded);
        }

        // Effects. The nonce moves first, before any external effect.
        storage::advance_nonce(&env, &quote.buyer)?;

        let mut position = storage::get_buyer(&env, &quote.buyer);
        if !position.participated {
            position.participated = true;
            status.buyers_count = status
                .buyers_count
                .checked_add(1)
                .ok_or(Error::MathOverflow)?;
            registry.on_first_participation(&sale, &quote.buyer);
        }
        position.amount = position
            .amount
            .checked_add(quote.token_amount)
            .ok_or(Error::MathOverflow)?;
        status.sold_tokens = new_sold;
        storage::set_buyer(&env, &quote.buyer, &position);
        storage::set_status(&env, &status);

        let pay_token = Self::resolve_currency(&env, &registry, &terms.currency);
        token::Client::new(&env, &pay_token).transfer(&quote.buyer, &sale, &quote.pay_amount);
        storage::add_raised(&env, &terms.currency, quote.pay_amount)?;

        registry.on_purchase(&sale, &quote.buyer, &quote.token_amount, &quote.pay_amount);
        events::purchase(
            &env,
            &quote.buyer,
            quote.token_amount,
            quote.pay_amount,
            quote.nonce,
        );

        // One-way latch: reaching the cap brings the end forward to now.
        if status.sold_tokens >= terms.hard_cap && !status.ended_early {
            status.ended_early = true;
            status.end_time = now;
            storage::set_status(&env, &status);
            registry.on_ended_early(&sale);
            events::ended_early(&env, now, status.sold_tokens);
        }

        storage::release_op_lock(&env);
        Ok(())
    }

    /// Release whatever has vested and not yet been claimed. Rejects when
    /// nothing is claimable, so repeated calls never double-release.
    pub fn claim(env: Env, buyer: Address) -> Result<i128, Error> {
        buyer.require_auth();
        storage::acquire_op_lock(&env)?;

        let terms = storage::get_terms(&env)?;
        let mut status = storage::get_status(&env)?;
        let now = get_ledger_timestamp(&env);

        let mut position = storage::get_buyer(&env, &buyer);
        let vested = match vesting::vesting_start(status.ended_early, status.end_time, now) {
            None => 0,
            Some(start) => {
                vesting::vested_amount(position.amount, start, terms.vesting_duration, now)?
            }
        };
        let due = vesting::claimable_amount(vested, position.claimed);
        if due <= 0 {
            return Err(Error::NothingClaimable);
        }

        position.claimed = position
            .claimed
            .checked_add(due)
            .ok_or(Error::MathOverflow)?;
        if position.claimed > position.amount {
            return Err(Error::LedgerInvariant);
        }
        status.total_claimed = status
            .total_claimed
            .checked_add(due)
            .ok_or(Error::MathOverflow)?;
        if status.total_claimed > status.sold_tokens {
            return Err(Error::LedgerInvariant);
        }
        storage::set_buyer(&env, &buyer, &position);
        storage::set_status(&env, &status);

        let sale = env.current_contract_address();
        token::Client::new(&env, &terms.token).transfer(&sale, &buyer, &due);
        RegistryClient::new(&env, &terms.registry).on_claim(&sale, &buyer, &due);
        events::claim(&env, &buyer, due);

        storage::release_op_lock(&env);
        Ok(due)
    }

    /// Split the raised balance between the platform treasury and the
    /// project owner. Owner-only, post-end, single shot. The fee is taken
    /// from the balance held at withdrawal time.
    pub fn withdraw_proceeds(env: Env, caller: Address) -> Result<(i128, i128), Error> {
        caller.require_auth();
        storage::acquire_op_lock(&env)?;

        let terms = storage::get_terms(&env)?;
        let mut status = storage::get_status(&env)?;
        if caller != terms.project_owner {
            return Err(Error::Unauthorized);
        }
        let now = get_ledger_timestamp(&env);
        if vesting::vesting_start(status.ended_early, status.end_time, now).is_none() {
            return Err(Error::SaleStillActive);
        }
        if status.proceeds_withdrawn {
            return Err(Error::AlreadyWithdrawn);
        }

        let registry = RegistryClient::new(&env, &terms.registry);
        let sale = env.current_contract_address();
        let pay_token = token::Client::new(
            &env,
            &Self::resolve_currency(&env, &registry, &terms.currency),
        );

        let balance = pay_token.balance(&sale);
        let fee = balance
            .checked_mul(registry.platform_fee_bps() as i128)
            .ok_or(Error::MathOverflow)?
            / 10_000;
        let net = balance - fee;

        status.proceeds_withdrawn = true;
        storage::set_status(&env, &status);

        if fee > 0 {
            pay_token.transfer(&sale, &registry.treasury(), &fee);
        }
        if net > 0 {
            pay_token.transfer(&sale, &terms.project_owner, &net);
        }

        registry.on_proceeds_withdrawn(&sale, &net, &fee);
        events::proceeds_withdrawn(&env, &terms.currency, net, fee);

        storage::release_op_lock(&env);
        Ok((net, fee))
    }

    /// Withdraw sale tokens in excess of what buyers are still owed.
    pub fn withdraw_unsold_tokens(env: Env, caller: Address, to: Address) -> Result<i128, Error> {
        caller.require_auth();
        storage::acquire_op_lock(&env)?;

        let terms = storage::get_terms(&env)?;
        let status = storage::get_status(&env)?;
        if caller != terms.project_owner {
            return Err(Error::Unauthorized);
        }
        let now = get_ledger_timestamp(&env);
        if vesting::vesting_start(status.ended_early, status.end_time, now).is_none() {
            return Err(Error::SaleStillActive);
        }

        // Sold-but-unclaimed entitlement stays reserved until claimed.
        let reserved = status.sold_tokens - status.total_claimed;
        if reserved < 0 {
            return Err(Error::LedgerInvariant);
        }

        let sale = env.current_contract_address();
        let token = token::Client::new(&env, &terms.token);
        let excess = token.balance(&sale) - reserved;
        if excess <= 0 {
            return Err(Error::NoUnsoldTokens);
        }
        token.transfer(&sale, &to, &excess);
        events::unsold_withdrawn(&env, &to, excess);

        storage::release_op_lock(&env);
        Ok(excess)
    }

    /// Operational escape hatch for the registry administrator: move an
    /// arbitrary asset balance out of the instance. Outside the normal-path
    /// guarantees.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        asset: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        storage::acquire_op_lock(&env)?;

        let terms = storage::get_terms(&env)?;
        let registry = RegistryClient::new(&env, &terms.registry);
        if caller != registry.admin() {
            return Err(Error::Unauthorized);
        }
        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        token::Client::new(&env, &asset).transfer(&env.current_contract_address(), &to, &amount);
        events::emergency_withdrawal(&env, &asset, &to, amount);

        storage::release_op_lock(&env);
        Ok(())
    }

    /// Pause or resume the purchase path. Claims and withdrawals are never
    /// pause-blocked.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), Error> {
        caller.require_auth();

        let terms = storage::get_terms(&env)?;
        if caller != terms.project_owner {
            return Err(Error::Unauthorized);
        }
        storage::set_paused(&env, paused);
        events::paused(&env, paused);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn terms(env: Env) -> Result<SaleTerms, Error> {
        storage::get_terms(&env)
    }

    pub fn status(env: Env) -> Result<SaleStatus, Error> {
        storage::get_status(&env)
    }

    pub fn state(env: Env) -> Result<SaleState, Error> {
        let terms = storage::get_terms(&env)?;
        let status = storage::get_status(&env)?;
        let now = get_ledger_timestamp(&env);

        if !status.ended_early && now < terms.start_time {
            return Ok(SaleState::Scheduled);
        }
        match vesting::vesting_start(status.ended_early, status.end_time, now) {
            None => Ok(SaleState::Active),
            Some(start) => {
                let elapsed = now.saturating_sub(start);
                if elapsed == 0 && terms.vesting_duration > 0 {
                    if status.ended_early {
                        Ok(SaleState::EndedEarly)
                    } else {
                        Ok(SaleState::Ended)
                    }
                } else if elapsed < terms.vesting_duration {
                    Ok(SaleState::Vesting)
                } else {
                    Ok(SaleState::FullyVested)
                }
            }
        }
    }

    pub fn buyer_position(env: Env, buyer: Address) -> Option<BuyerPosition> {
        let position = storage::get_buyer(&env, &buyer);
        if position.participated {
            Some(position)
        } else {
            None
        }
    }

    pub fn nonce_of(env: Env, buyer: Address) -> u64 {
        storage::get_nonce(&env, &buyer)
    }

    pub fn raised(env: Env, currency: PaymentCurrency) -> i128 {
        storage::get_raised(&env, &currency)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    /// Effective vesting start, or `None` while the sale is still running.
    pub fn vesting_start(env: Env) -> Result<Option<u64>, Error> {
        let status = storage::get_status(&env)?;
        let now = get_ledger_timestamp(&env);
        Ok(vesting::vesting_start(
            status.ended_early,
            status.end_time,
            now,
        ))
    }

    pub fn vested_amount(env: Env, buyer: Address) -> Result<i128, Error> {
        let terms = storage::get_terms(&env)?;
        let status = storage::get_status(&env)?;
        let now = get_ledger_timestamp(&env);
        let position = storage::get_buyer(&env, &buyer);
        match vesting::vesting_start(status.ended_early, status.end_time, now) {
            None => Ok(0),
            Some(start) => {
                vesting::vested_amount(position.amount, start, terms.vesting_duration, now)
            }
        }
    }

    pub fn claimable(env: Env, buyer: Address) -> Result<i128, Error> {
        let position = storage::get_buyer(&env, &buyer);
        let vested = Self::vested_amount(env, buyer)?;
        Ok(vesting::claimable_amount(vested, position.claimed))
    }

    /// The digest the quote signer must sign for this exact quote against
    /// this sale instance on this network.
    pub fn quote_digest(env: Env, quote: PurchaseQuote) -> Result<BytesN<32>, Error> {
        let terms = storage::get_terms(&env)?;
        let sale = env.current_contract_address();
        let digest = quote::digest(&env, &sale, &terms.currency, &quote);
        Ok(BytesN::from_array(&env, &digest.to_array()))
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn resolve_currency(
        env: &Env,
        registry: &RegistryClient,
        currency: &PaymentCurrency,
    ) -> Address {
        match currency {
            PaymentCurrency::Native => registry.native_token(),
            PaymentCurrency::Token(token) => token.clone(),
        }
    }
}
