//! Constant-product curve arithmetic.
//!
//! Every amount is a u64 in the token's smallest unit. Products are taken in
//! u128 and every division truncates, so rounding always favours the pool.

use crate::constants::BPS_DENOMINATOR;
use crate::errors::PoolError;
use anchor_lang::prelude::*;
use integer_sqrt::IntegerSquareRoot;

fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(PoolError::MathOverflow))
}

/// `a * b / denominator`, truncating.
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    let value = (a as u128)
        .checked_mul(b as u128)
        .and_then(|v| v.checked_div(denominator as u128))
        .ok_or(PoolError::MathOverflow)?;
    to_u64(value)
}

/// Input left for the curve once the fee has been taken off the top.
///
/// Returns `(amount_in_after_fee, fee_amount)`. The fee is the remainder, so
/// `after_fee + fee == amount_in` and the fee rounds up.
pub fn apply_fee(amount_in: u64, fee_rate_bps: u16) -> Result<(u64, u64)> {
    let retained_bps = BPS_DENOMINATOR
        .checked_sub(fee_rate_bps as u64)
        .ok_or(PoolError::InvalidFeeRate)?;
    let after_fee = mul_div_floor(amount_in, retained_bps, BPS_DENOMINATOR)?;
    let fee_amount = amount_in
        .checked_sub(after_fee)
        .ok_or(PoolError::MathOverflow)?;
    Ok((after_fee, fee_amount))
}

/// Output of a constant-product exchange: `reserve_out - k / (reserve_in + amount_in)`
/// with the quotient rounded up, i.e. `floor(reserve_out * amount_in / (reserve_in + amount_in))`.
pub fn swap_output(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64> {
    require!(
        reserve_in > 0 && reserve_out > 0,
        PoolError::InsufficientLiquidity
    );

    let numerator = (reserve_out as u128)
        .checked_mul(amount_in as u128)
        .ok_or(PoolError::MathOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_add(amount_in as u128)
        .ok_or(PoolError::MathOverflow)?;

    to_u64(numerator / denominator)
}

/// Shares for the first deposit: the geometric mean of both amounts.
pub fn initial_shares(amount_a: u64, amount_b: u64) -> Result<u64> {
    let product = (amount_a as u128)
        .checked_mul(amount_b as u128)
        .ok_or(PoolError::MathOverflow)?;
    to_u64(product.integer_sqrt())
}

/// Shares for a deposit into a funded pool, credited on the scarcer side.
pub fn proportional_shares(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
) -> Result<u64> {
    require!(
        reserve_a > 0 && reserve_b > 0,
        PoolError::InsufficientLiquidity
    );

    let by_a = (amount_a as u128)
        .checked_mul(total_shares as u128)
        .ok_or(PoolError::MathOverflow)?
        / reserve_a as u128;
    let by_b = (amount_b as u128)
        .checked_mul(total_shares as u128)
        .ok_or(PoolError::MathOverflow)?
        / reserve_b as u128;

    to_u64(by_a.min(by_b))
}

/// Reserve amounts redeemed by burning `shares` out of `total_shares`.
pub fn shares_to_amounts(
    shares: u64,
    total_shares: u64,
    reserve_a: u64,
    reserve_b: u64,
) -> Result<(u64, u64)> {
    require!(
        shares <= total_shares && total_shares > 0,
        PoolError::ExcessiveBurnAmount
    );

    let amount_a = mul_div_floor(shares, reserve_a, total_shares)?;
    let amount_b = mul_div_floor(shares, reserve_b, total_shares)?;
    Ok((amount_a, amount_b))
}
