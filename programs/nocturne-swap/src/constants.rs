//! PDA seeds and fixed pool parameters.

pub const POOL_SEED: &[u8] = b"pool";
pub const TOKEN_A_VAULT_SEED: &[u8] = b"token_a_vault";
pub const TOKEN_B_VAULT_SEED: &[u8] = b"token_b_vault";
pub const LP_MINT_SEED: &[u8] = b"lp_mint";

/// Fee rates are expressed out of this many basis points.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Decimals of the liquidity-share mint.
pub const LP_MINT_DECIMALS: u8 = 9;
