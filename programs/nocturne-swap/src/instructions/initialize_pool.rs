use crate::constants::{
    LP_MINT_DECIMALS, LP_MINT_SEED, POOL_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED,
};
use crate::errors::PoolError;
use crate::events::PoolInitialized;
use crate::state::{Pool, PoolParams};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Initialize a new AMM liquidity pool
pub fn process(ctx: Context<InitializePool>, fee_rate_bps: u16) -> Result<()> {
    let params = PoolParams {
        authority: ctx.accounts.authority.key(),
        token_a_mint: ctx.accounts.token_a_mint.key(),
        token_b_mint: ctx.accounts.token_b_mint.key(),
        token_a_vault: ctx.accounts.token_a_vault.key(),
        token_b_vault: ctx.accounts.token_b_vault.key(),
        lp_mint: ctx.accounts.lp_mint.key(),
        fee_rate_bps,
        bump: ctx.bumps.pool,
        token_a_vault_bump: ctx.bumps.token_a_vault,
        token_b_vault_bump: ctx.bumps.token_b_vault,
        lp_mint_bump: ctx.bumps.lp_mint,
    };

    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    pool.initialize(params)?;

    msg!(
        "Pool initialized for {} / {} with fee {} bps",
        pool.token_a_mint,
        pool.token_b_mint,
        fee_rate_bps
    );

    emit!(PoolInitialized {
        pool: pool_key,
        authority: pool.authority,
        token_a_mint: pool.token_a_mint,
        token_b_mint: pool.token_b_mint,
        fee_rate_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    /// Lower mint of the trading pair
    pub token_a_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Higher mint of the trading pair
    #[account(
        constraint = token_a_mint.key() != token_b_mint.key() @ PoolError::IdenticalTokens,
        constraint = token_a_mint.key() < token_b_mint.key() @ PoolError::UnorderedTokenPair,
    )]
    pub token_b_mint: Box<InterfaceAccount<'info, Mint>>,

    /// PDA that stores pool state and signs for its vaults and LP mint.
    /// Opened with init_if_needed so a second initialization reaches the
    /// handler and fails with PoolAlreadyExists.
    #[account(
        init_if_needed,
        space = 8 + Pool::INIT_SPACE,
        payer = authority,
        seeds = [
            POOL_SEED,
            token_a_mint.key().as_ref(),
            token_b_mint.key().as_ref()
        ],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// Vault to hold token A reserves
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [TOKEN_A_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_a_mint,
        token::authority = pool,
        token::token_program = token_program,
    )]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Vault to hold token B reserves
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [TOKEN_B_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = token_b_mint,
        token::authority = pool,
        token::token_program = token_program,
    )]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Liquidity-share mint
    #[account(
        init_if_needed,
        payer = authority,
        seeds = [LP_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = pool,
        mint::token_program = token_program,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Creator of the pool, pays for the accounts
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Interface<'info, TokenInterface>,
}
