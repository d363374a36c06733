//! Quote authorization: canonical encoding, digest, and signer recovery.
//!
//! A quote is signed off-chain over `keccak256(prefix || keccak256(payload))`
//! where the payload binds, in order: network id, sale address, buyer,
//! payment currency, payment amount, token amount, expiry, nonce. Binding the
//! network id and the sale's own address rules out cross-network and
//! cross-sale replay; the nonce rules out same-sale replay.

use soroban_sdk::{crypto::Hash, xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::errors::Error;
use crate::types::{PaymentCurrency, PurchaseQuote};

/// Conventional signed-message framing (SEP-53 prefix) applied over the
/// payload hash before signing.
const SIGNED_MESSAGE_PREFIX: &[u8; 24] = b"Stellar Signed Message:\n";

const CURRENCY_TAG_NATIVE: u8 = 0;
const CURRENCY_TAG_TOKEN: u8 = 1;

/// Deterministic, order-sensitive encoding of everything a quote authorizes.
fn encode_payload(
    env: &Env,
    sale: &Address,
    currency: &PaymentCurrency,
    quote: &PurchaseQuote,
) -> Bytes {
    let mut data = Bytes::new(env);

    data.append(&Bytes::from_slice(
        env,
        &env.ledger().network_id().to_array(),
    ));
    data.append(&sale.clone().to_xdr(env));
    data.append(&quote.buyer.clone().to_xdr(env));

    match currency {
        PaymentCurrency::Native => data.push_back(CURRENCY_TAG_NATIVE),
        PaymentCurrency::Token(token) => {
            data.push_back(CURRENCY_TAG_TOKEN);
            data.append(&token.clone().to_xdr(env));
        }
    }

    data.append(&Bytes::from_slice(env, &quote.pay_amount.to_be_bytes()));
    data.append(&Bytes::from_slice(env, &quote.token_amount.to_be_bytes()));
    data.append(&Bytes::from_slice(env, &quote.expires_at.to_be_bytes()));
    data.append(&Bytes::from_slice(env, &quote.nonce.to_be_bytes()));

    data
}

/// The digest a quote signer actually signs.
pub fn digest(
    env: &Env,
    sale: &Address,
    currency: &PaymentCurrency,
    quote: &PurchaseQuote,
) -> Hash<32> {
    let payload_hash = env.crypto().keccak256(&encode_payload(env, sale, currency, quote));

    let mut framed = Bytes::from_slice(env, SIGNED_MESSAGE_PREFIX);
    framed.append(&Bytes::from_slice(env, &payload_hash.to_array()));
    env.crypto().keccak256(&framed)
}

/// Recovers the identity that produced `signature` over `digest`. Returns
/// the 65-byte uncompressed secp256k1 public key; the caller compares it
/// against the configured authorizing identity.
pub fn recover_signer(
    env: &Env,
    digest: &Hash<32>,
    signature: &BytesN<64>,
    recovery_id: u32,
) -> Result<BytesN<65>, Error> {
    if recovery_id > 3 {
        return Err(Error::InvalidRecoveryId);
    }
    Ok(env
        .crypto()
        .secp256k1_recover(digest, signature, recovery_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{Address, Env};

    fn sample_quote(env: &Env) -> PurchaseQuote {
        PurchaseQuote {
            buyer: Address::generate(env),
            pay_amount: 5_000,
            token_amount: 1_000,
            expires_at: 1_700_000_000,
            nonce: 0,
        }
    }

    #[test]
    fn digest_is_deterministic() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let quote = sample_quote(&env);

        let a = digest(&env, &sale, &PaymentCurrency::Native, &quote);
        let b = digest(&env, &sale, &PaymentCurrency::Native, &quote);
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn digest_binds_every_field() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let quote = sample_quote(&env);
        let base = digest(&env, &sale, &PaymentCurrency::Native, &quote).to_array();

        let other_sale = Address::generate(&env);
        assert_ne!(
            base,
            digest(&env, &other_sale, &PaymentCurrency::Native, &quote).to_array()
        );

        let mut q = quote.clone();
        q.buyer = Address::generate(&env);
        assert_ne!(
            base,
            digest(&env, &sale, &PaymentCurrency::Native, &q).to_array()
        );

        let mut q = quote.clone();
        q.pay_amount += 1;
        assert_ne!(
            base,
            digest(&env, &sale, &PaymentCurrency::Native, &q).to_array()
        );

        let mut q = quote.clone();
        q.token_amount += 1;
        assert_ne!(
            base,
            digest(&env, &sale, &PaymentCurrency::Native, &q).to_array()
        );

        let mut q = quote.clone();
        q.expires_at += 1;
        assert_ne!(
            base,
            digest(&env, &sale, &PaymentCurrency::Native, &q).to_array()
        );

        let mut q = quote.clone();
        q.nonce += 1;
        assert_ne!(
            base,
            digest(&env, &sale, &PaymentCurrency::Native, &q).to_array()
        );
    }

    #[test]
    fn digest_binds_the_currency() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let quote = sample_quote(&env);
        let token = Address::generate(&env);

        let native = digest(&env, &sale, &PaymentCurrency::Native, &quote).to_array();
        let tokenized =
            digest(&env, &sale, &PaymentCurrency::Token(token.clone()), &quote).to_array();
        assert_ne!(native, tokenized);

        let other = digest(
            &env,
            &sale,
            &PaymentCurrency::Token(Address::generate(&env)),
            &quote,
        )
        .to_array();
        assert_ne!(tokenized, other);
    }

    #[test]
    fn digest_is_prefix_framed() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let quote = sample_quote(&env);

        let framed = digest(&env, &sale, &PaymentCurrency::Native, &quote).to_array();
        let raw = env
            .crypto()
            .keccak256(&encode_payload(
                &env,
                &sale,
                &PaymentCurrency::Native,
                &quote,
            ))
            .to_array();
        assert_ne!(framed, raw);
    }

    #[test]
    fn recovery_id_is_bounded() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let quote = sample_quote(&env);
        let d = digest(&env, &sale, &PaymentCurrency::Native, &quote);
        let sig = BytesN::from_array(&env, &[1u8; 64]);

        assert_eq!(
            recover_signer(&env, &d, &sig, 4),
            Err(Error::InvalidRecoveryId)
        );
    }
}
