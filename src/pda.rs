//! Deterministic addresses for the program's PDA-owned state.
//!
//! Seed layouts here must match the on-chain account constraints bit for
//! bit: a drifted namespace string or integer width derives a different
//! address and the client simply stops finding its accounts.

use solana_sdk::pubkey::{MAX_SEED_LEN, MAX_SEEDS, Pubkey};
use std::borrow::Cow;
use thiserror::Error;

/// Address the surf program is deployed at.
pub const SURF_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("4wVrbfSHxmhevzPzNfdpmVkJ2jqNRy6RYt4TxcHsnfSo");

/// Seed namespace of the singleton admin config account.
pub const ADMIN_CONFIG_NAMESPACE: &str = "admin_config";
/// Seed namespace of a vault state account.
pub const VAULT_STATE_NAMESPACE: &str = "vault_state";
/// Seed namespace of a vault's whirlpool position record.
pub const WHIRLPOOL_POSITION_NAMESPACE: &str = "whirlpool_position";
/// Seed namespace of a vault's hedge position record.
pub const HEDGE_POSITION_NAMESPACE: &str = "hedge_position";
/// Seed namespace of a user's position record.
pub const USER_POSITION_NAMESPACE: &str = "user_position";

/// One component of a derivation seed tuple.
#[derive(Debug, Clone, Copy)]
pub enum SeedSpec<'a> {
    /// Constant namespace string, fed in verbatim as UTF-8 bytes.
    Utf8Const(&'a str),
    /// The raw 32 bytes of an account address.
    PubkeyBytes(&'a Pubkey),
    /// Unsigned counter serialized as 8 little-endian bytes, the one
    /// integer width the program uses in seeds.
    UintLE(u64),
}

impl SeedSpec<'_> {
    /// Byte encoding handed to the derivation primitive.
    pub fn seed_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8Const(value) => Cow::Borrowed(value.as_bytes()),
            Self::PubkeyBytes(key) => Cow::Borrowed(key.as_ref()),
            Self::UintLE(value) => Cow::Owned(value.to_le_bytes().to_vec()),
        }
    }
}

/// Errors raised while assembling a derivation seed tuple.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DerivationError {
    /// A seed component exceeds the host limit of 32 bytes.
    #[error("seed component is {len} bytes, the maximum is 32")]
    SeedTooLong { len: usize },
    /// The tuple has more components than the host accepts.
    #[error("seed tuple has {count} components, the maximum is 16")]
    TooManySeeds { count: usize },
    /// No bump byte produces an off-curve address for this tuple.
    #[error("no viable bump seed for the given seed tuple")]
    NoViableBump,
}

/// Derive the program address and bump for a seed tuple.
///
/// Host limits are checked up front so a failure carries the offending
/// measurement instead of a generic rejection from the chain primitive.
/// Same program id and seeds always produce the same address and bump;
/// uniqueness across distinct tuples is the host primitive's guarantee,
/// not this layer's.
pub fn derive_address(
    seeds: &[SeedSpec<'_>],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    if seeds.len() > MAX_SEEDS {
        return Err(DerivationError::TooManySeeds { count: seeds.len() });
    }
    let mut encoded: Vec<Cow<'_, [u8]>> = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let bytes = seed.seed_bytes();
        if bytes.len() > MAX_SEED_LEN {
            return Err(DerivationError::SeedTooLong { len: bytes.len() });
        }
        encoded.push(bytes);
    }
    let seed_slices: Vec<&[u8]> = encoded.iter().map(|seed| &**seed).collect();
    Pubkey::try_find_program_address(&seed_slices, program_id)
        .ok_or(DerivationError::NoViableBump)
}

/// Address of the singleton admin config account.
pub fn admin_config_address() -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[SeedSpec::Utf8Const(ADMIN_CONFIG_NAMESPACE)],
        &SURF_PROGRAM_ID,
    )
}

/// Address of the vault state bound to a whirlpool.
pub fn vault_state_address(whirlpool: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[
            SeedSpec::Utf8Const(VAULT_STATE_NAMESPACE),
            SeedSpec::PubkeyBytes(whirlpool),
        ],
        &SURF_PROGRAM_ID,
    )
}

/// Address of a vault's whirlpool position record, by sequence id.
pub fn whirlpool_position_address(
    vault_state: &Pubkey,
    position_id: u64,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[
            SeedSpec::Utf8Const(WHIRLPOOL_POSITION_NAMESPACE),
            SeedSpec::PubkeyBytes(vault_state),
            SeedSpec::UintLE(position_id),
        ],
        &SURF_PROGRAM_ID,
    )
}

/// Address of a vault's hedge position record, by sequence id.
pub fn hedge_position_address(
    vault_state: &Pubkey,
    hedge_position_id: u64,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[
            SeedSpec::Utf8Const(HEDGE_POSITION_NAMESPACE),
            SeedSpec::PubkeyBytes(vault_state),
            SeedSpec::UintLE(hedge_position_id),
        ],
        &SURF_PROGRAM_ID,
    )
}

/// Address of an owner's position record in a vault.
pub fn user_position_address(
    vault_state: &Pubkey,
    owner: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    derive_address(
        &[
            SeedSpec::Utf8Const(USER_POSITION_NAMESPACE),
            SeedSpec::PubkeyBytes(vault_state),
            SeedSpec::PubkeyBytes(owner),
        ],
        &SURF_PROGRAM_ID,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derivation_is_deterministic() {
        let whirlpool = Pubkey::new_unique();
        assert_eq!(
            vault_state_address(&whirlpool).unwrap(),
            vault_state_address(&whirlpool).unwrap()
        );
        assert_eq!(
            admin_config_address().unwrap(),
            admin_config_address().unwrap()
        );
    }

    #[test]
    fn test_distinct_position_ids_produce_distinct_addresses() {
        let vault_state = Pubkey::new_unique();
        let addresses: HashSet<Pubkey> = (0..1000)
            .map(|id| whirlpool_position_address(&vault_state, id).unwrap().0)
            .collect();
        assert_eq!(addresses.len(), 1000);
    }

    #[test]
    fn test_uint_seeds_encode_little_endian() {
        let bytes = SeedSpec::UintLE(1).seed_bytes();
        assert_eq!(&bytes[..], &[1, 0, 0, 0, 0, 0, 0, 0][..]);
        let bytes = SeedSpec::UintLE(0x0102_0304).seed_bytes();
        assert_eq!(&bytes[..], &[4, 3, 2, 1, 0, 0, 0, 0][..]);
    }

    #[test]
    fn test_namespace_seeds_are_verbatim_utf8() {
        let bytes = SeedSpec::Utf8Const(VAULT_STATE_NAMESPACE).seed_bytes();
        assert_eq!(&bytes[..], &b"vault_state"[..]);
    }

    #[test]
    fn test_helpers_match_raw_derivation() {
        let whirlpool = Pubkey::new_unique();
        let (address, bump) = vault_state_address(&whirlpool).unwrap();
        let (expected_address, expected_bump) =
            Pubkey::find_program_address(&[b"vault_state", whirlpool.as_ref()], &SURF_PROGRAM_ID);
        assert_eq!(address, expected_address);
        assert_eq!(bump, expected_bump);

        let owner = Pubkey::new_unique();
        let (address, _) = user_position_address(&whirlpool, &owner).unwrap();
        let (expected_address, _) = Pubkey::find_program_address(
            &[b"user_position", whirlpool.as_ref(), owner.as_ref()],
            &SURF_PROGRAM_ID,
        );
        assert_eq!(address, expected_address);

        let (address, _) = hedge_position_address(&whirlpool, 7).unwrap();
        let (expected_address, _) = Pubkey::find_program_address(
            &[b"hedge_position", whirlpool.as_ref(), &7u64.to_le_bytes()],
            &SURF_PROGRAM_ID,
        );
        assert_eq!(address, expected_address);
    }

    #[test]
    fn test_overlong_seed_is_rejected() {
        let long = "x".repeat(33);
        let result = derive_address(&[SeedSpec::Utf8Const(&long)], &SURF_PROGRAM_ID);
        assert_eq!(result, Err(DerivationError::SeedTooLong { len: 33 }));
    }

    #[test]
    fn test_oversized_tuple_is_rejected() {
        let seeds = vec![SeedSpec::UintLE(0); 17];
        let result = derive_address(&seeds, &SURF_PROGRAM_ID);
        assert_eq!(result, Err(DerivationError::TooManySeeds { count: 17 }));
    }
}
