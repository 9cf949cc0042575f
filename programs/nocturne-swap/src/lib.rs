#![allow(deprecated)]
#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;
use state::SwapDirection;

#[cfg(test)]
mod tests;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod nocturne_swap {
    use super::*;

    /// Create the pool, its two vaults and its LP mint for an ordered mint pair
    pub fn initialize_pool(ctx: Context<InitializePool>, fee_rate_bps: u16) -> Result<()> {
        instructions::initialize_pool::process(ctx, fee_rate_bps)
    }

    /// Add liquidity to the pool and receive LP tokens
    pub fn add_liquidity(
        ctx: Context<ManageLiquidity>,
        amount_a: u64,
        amount_b: u64,
        min_liquidity_out: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::deposit(ctx, amount_a, amount_b, min_liquidity_out)
    }

    /// Remove liquidity from the pool by burning LP tokens
    pub fn remove_liquidity(
        ctx: Context<ManageLiquidity>,
        shares: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<()> {
        instructions::manage_liquidity::withdraw(ctx, shares, min_amount_a, min_amount_b)
    }

    /// Swap tokens using the constant product formula
    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        minimum_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<()> {
        instructions::swap::process(ctx, amount_in, minimum_amount_out, direction)
    }
}
