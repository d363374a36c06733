use soroban_sdk::{contract, contractimpl, contractmeta, Address, BytesN, Env, Vec};
use token_sale::{PaymentCurrency, TokenSaleContractClient};

use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::*;

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Sale Registry: platform config, discovery and sale-verified hooks"
);

#[contract]
pub struct SaleRegistryContract;

#[contractimpl]
impl SaleRegistryContract {
    /// Set up the platform: administrator, quote-signing identity, treasury,
    /// proceeds fee, and the native asset's token contract.
    pub fn initialize(
        env: Env,
        admin: Address,
        quote_signer: BytesN<65>,
        treasury: Address,
        fee_bps: u32,
        native_token: Address,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if fee_bps > 10_000 {
            return Err(Error::InvalidConfig);
        }

        storage::set_config(
            &env,
            &PlatformConfig {
                admin: admin.clone(),
                quote_signer,
                treasury: treasury.clone(),
                fee_bps,
                native_token,
            },
        );

        events::registry_initialized(&env, &admin, &treasury, fee_bps);
        Ok(())
    }

    /// Admit a deployed sale instance into the registry and assign it the
    /// next stable id (ids start at 1). The sale's terms must point back at
    /// this registry and use a whitelisted payment currency.
    pub fn register_sale(env: Env, sale: Address) -> Result<u64, Error> {
        let config = storage::get_config(&env)?;
        config.admin.require_auth();

        if storage::is_registered(&env, &sale) {
            return Err(Error::AlreadyRegistered);
        }

        let terms = match TokenSaleContractClient::new(&env, &sale).try_terms() {
            Ok(Ok(terms)) => terms,
            _ => return Err(Error::TermsUnavailable),
        };
        if terms.registry != env.current_contract_address() {
            return Err(Error::RegistryMismatch);
        }
        match &terms.currency {
            PaymentCurrency::Native => {}
            PaymentCurrency::Token(token) => {
                if !storage::is_token_allowed(&env, token) {
                    return Err(Error::CurrencyNotAllowed);
                }
            }
        }

        let id = storage::get_sale_count(&env)
            .checked_add(1)
            .ok_or(Error::MathOverflow)?;
        storage::set_sale_count(&env, id);
        storage::set_sale_address(&env, id, &sale);
        storage::set_sale_id(&env, &sale, id);
        storage::set_record(
            &env,
            &SaleRecord {
                id,
                sale: sale.clone(),
                project_owner: terms.project_owner.clone(),
                token: terms.token,
                currency: terms.currency,
                start_time: terms.start_time,
                end_time: terms.end_time,
                hard_cap: terms.hard_cap,
                registered_at: env.ledger().timestamp(),
                participants: 0,
                sold: 0,
                raised: 0,
                claimed: 0,
                ended_early: false,
                proceeds_withdrawn: false,
                proceeds_net: 0,
                proceeds_fee: 0,
            },
        );
        storage::push_user_sale(&env, &terms.project_owner, id);

        events::sale_registered(&env, id, &sale, &terms.project_owner);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Hooks. Callable only by the registered sale itself: the lookup pins
    // the claimed address to a known id and require_auth passes only when
    // that contract is the direct invoker.
    // ------------------------------------------------------------------

    pub fn on_first_participation(env: Env, sale: Address, _buyer: Address) -> Result<(), Error> {
        let mut record = Self::authorized_record(&env, &sale)?;
        record.participants = record
            .participants
            .checked_add(1)
            .ok_or(Error::MathOverflow)?;
        storage::set_record(&env, &record);
        Ok(())
    }

    pub fn on_purchase(
        env: Env,
        sale: Address,
        _buyer: Address,
        token_amount: i128,
        pay_amount: i128,
    ) -> Result<(), Error> {
        let mut record = Self::authorized_record(&env, &sale)?;
        record.sold = record
            .sold
            .checked_add(token_amount)
            .ok_or(Error::MathOverflow)?;
        record.raised = record
            .raised
            .checked_add(pay_amount)
            .ok_or(Error::MathOverflow)?;
        storage::set_record(&env, &record);
        Ok(())
    }

    pub fn on_ended_early(env: Env, sale: Address) -> Result<(), Error> {
        let mut record = Self::authorized_record(&env, &sale)?;
        record.ended_early = true;
        storage::set_record(&env, &record);
        Ok(())
    }

    pub fn on_claim(env: Env, sale: Address, _buyer: Address, amount: i128) -> Result<(), Error> {
        let mut record = Self::authorized_record(&env, &sale)?;
        record.claimed = record
            .claimed
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;
        storage::set_record(&env, &record);
        Ok(())
    }

    pub fn on_proceeds_withdrawn(
        env: Env,
        sale: Address,
        net_amount: i128,
        fee_amount: i128,
    ) -> Result<(), Error> {
        let mut record = Self::authorized_record(&env, &sale)?;
        record.proceeds_withdrawn = true;
        record.proceeds_net = net_amount;
        record.proceeds_fee = fee_amount;
        storage::set_record(&env, &record);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    pub fn set_quote_signer(env: Env, quote_signer: BytesN<65>) -> Result<(), Error> {
        let mut config = storage::get_config(&env)?;
        config.admin.require_auth();
        config.quote_signer = quote_signer.clone();
        storage::set_config(&env, &config);
        events::quote_signer_rotated(&env, &quote_signer);
        Ok(())
    }

    pub fn set_treasury(env: Env, treasury: Address) -> Result<(), Error> {
        let mut config = storage::get_config(&env)?;
        config.admin.require_auth();
        config.treasury = treasury.clone();
        storage::set_config(&env, &config);
        events::treasury_rotated(&env, &treasury);
        Ok(())
    }

    pub fn set_fee_bps(env: Env, fee_bps: u32) -> Result<(), Error> {
        let mut config = storage::get_config(&env)?;
        config.admin.require_auth();
        if fee_bps > 10_000 {
            return Err(Error::InvalidConfig);
        }
        config.fee_bps = fee_bps;
        storage::set_config(&env, &config);
        events::fee_updated(&env, fee_bps);
        Ok(())
    }

    pub fn allow_payment_token(env: Env, token: Address) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        config.admin.require_auth();
        storage::set_token_allowed(&env, &token, true);
        events::payment_token_allowed(&env, &token, true);
        Ok(())
    }

    pub fn revoke_payment_token(env: Env, token: Address) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        config.admin.require_auth();
        storage::set_token_allowed(&env, &token, false);
        events::payment_token_allowed(&env, &token, false);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Platform views consumed by sale instances
    // ------------------------------------------------------------------

    pub fn quote_signer(env: Env) -> Result<BytesN<65>, Error> {
        Ok(storage::get_config(&env)?.quote_signer)
    }

    pub fn treasury(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.treasury)
    }

    pub fn platform_fee_bps(env: Env) -> Result<u32, Error> {
        Ok(storage::get_config(&env)?.fee_bps)
    }

    pub fn native_token(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.native_token)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Ok(storage::get_config(&env)?.admin)
    }

    // ------------------------------------------------------------------
    // Discovery
    // ------------------------------------------------------------------

    pub fn sale_count(env: Env) -> u64 {
        storage::get_sale_count(&env)
    }

    pub fn sale_address(env: Env, id: u64) -> Result<Address, Error> {
        storage::get_sale_address(&env, id)
    }

    pub fn sale_id(env: Env, sale: Address) -> Result<u64, Error> {
        storage::get_sale_id(&env, &sale)
    }

    pub fn sale_record(env: Env, id: u64) -> Result<SaleRecord, Error> {
        storage::get_record(&env, id)
    }

    /// Page through records in id order. `start` is the first id to return
    /// (0 is treated as 1), `limit` the page size.
    pub fn sales(env: Env, start: u64, limit: u32) -> Vec<SaleRecord> {
        let count = storage::get_sale_count(&env);
        let mut out = Vec::new(&env);
        let mut id = start.max(1);
        while id <= count && out.len() < limit {
            if let Ok(record) = storage::get_record(&env, id) {
                out.push_back(record);
            }
            id += 1;
        }
        out
    }

    /// Sale ids registered for this project owner, in insertion order.
    pub fn sales_of(env: Env, user: Address) -> Vec<u64> {
        storage::get_user_sales(&env, &user)
    }

    pub fn is_payment_token_allowed(env: Env, token: Address) -> bool {
        storage::is_token_allowed(&env, &token)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn authorized_record(env: &Env, sale: &Address) -> Result<SaleRecord, Error> {
        let id = storage::get_sale_id(env, sale)?;
        sale.require_auth();
        storage::get_record(env, id)
    }
}
