//! Borsh layouts and strict decoding for the program's PDA accounts.
//!
//! Each struct mirrors its on-chain account field for field; the 8-byte
//! discriminator preceding the payload is `sha256("account:{Name}")[0..8]`.
//! Unlike the generated TypeScript parsers, which collapse every failure
//! into `null`, this layer splits "no account" from "corrupt account" so
//! callers can tell an unfunded address from a bug. The hedge position
//! account is zero-copy on chain (C layout with padding) and has no borsh
//! representation here; its address helper lives in [`crate::pda`].

use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Length of the account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Errors raised while decoding account data.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The buffer cannot even hold a discriminator.
    #[error("account data too short for a discriminator: {len} bytes")]
    TooShort { len: usize },
    /// The discriminator belongs to a different account kind.
    #[error("account discriminator does not match {account}")]
    DiscriminatorMismatch { account: &'static str },
    /// The payload after the discriminator does not deserialize.
    #[error("malformed {account} account data")]
    Data {
        account: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// A deserializable account layout with its discriminator identity.
pub trait AccountState: BorshDeserialize {
    /// Account name as the program declares it, the discriminator preimage.
    const NAME: &'static str;

    /// First 8 bytes of `sha256("account:{NAME}")`.
    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        let digest = Sha256::digest(format!("account:{}", Self::NAME).as_bytes());
        let mut discriminator = [0u8; DISCRIMINATOR_LEN];
        discriminator.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
        discriminator
    }
}

/// Decode an account's data, distinguishing absence from corruption.
///
/// `None` input (no account at the address) decodes to `Ok(None)`. Present
/// data must carry the expected discriminator and deserialize exactly, with
/// no trailing bytes.
pub fn decode_account<T: AccountState>(data: Option<&[u8]>) -> Result<Option<T>, DecodeError> {
    let Some(bytes) = data else {
        return Ok(None);
    };
    if bytes.len() < DISCRIMINATOR_LEN {
        return Err(DecodeError::TooShort { len: bytes.len() });
    }
    let (discriminator, body) = bytes.split_at(DISCRIMINATOR_LEN);
    if discriminator != T::discriminator().as_slice() {
        return Err(DecodeError::DiscriminatorMismatch { account: T::NAME });
    }
    let state = T::try_from_slice(body).map_err(|source| DecodeError::Data {
        account: T::NAME,
        source,
    })?;
    Ok(Some(state))
}

/// Singleton admin configuration.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AdminConfig {
    pub admin_key: Pubkey,
    pub bump: u8,
}

impl AccountState for AdminConfig {
    const NAME: &'static str = "AdminConfig";
}

/// Per-whirlpool vault state.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VaultState {
    pub bump: u8,

    pub whirlpool: Pubkey,

    pub base_token_mint: Pubkey,
    pub quote_token_mint: Pubkey,
    pub base_token_account: Pubkey,
    pub quote_token_account: Pubkey,

    // Tick ranges in basis points.
    pub full_tick_range: u32,
    pub vault_tick_range: u32,
    pub hedge_tick_range: u32,

    pub whirlpool_positions_count: u64,
    pub current_whirlpool_position_id: Option<u64>,

    pub drift_stats: Pubkey,
    pub drift_subaccount: Pubkey,

    pub collateral_amount: u64,
    pub collateral_interest_growth: u128,
    pub collateral_interest_growth_checkpoint: u128,

    pub hedge_positions_count: u64,
    pub current_hedge_position_id: Option<u64>,
}

impl AccountState for VaultState {
    const NAME: &'static str = "VaultState";
}

/// One whirlpool position a vault has opened, by sequence id.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct WhirlpoolPosition {
    pub bump: u8,

    pub id: u64,
    pub whirlpool_position: Pubkey,

    pub liquidity: u128,
    pub liquidity_diff: i128,

    pub base_token_fee_growth: u128,
    pub quote_token_fee_growth: u128,
}

impl AccountState for WhirlpoolPosition {
    const NAME: &'static str = "WhirlpoolPosition";
}

/// A user's stake in a vault, with fee and interest checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UserPosition {
    pub bump: u8,

    pub liquidity: u128,

    pub fee_growth_checkpoint_base_token: u128,
    pub fee_growth_checkpoint_quote_token: u128,

    pub fee_unclaimed_base_token: u64,
    pub fee_unclaimed_quote_token: u64,

    pub collateral_amount: u64,
    pub borrow_amount: u64,
    pub borrow_amount_notional: u64,

    pub collateral_interest_growth_checkpoint: u128,
    pub borrow_interest_growth_checkpoint: u128,

    pub collateral_interest_unclaimed: u64,
    pub borrow_interest_unclaimed: u64,

    pub whirlpool_position_id: u64,
    pub hedge_position_id: u64,
    pub borrow_position_index: u8,
}

impl AccountState for UserPosition {
    const NAME: &'static str = "UserPosition";
}
