use crate::constants::POOL_SEED;
use crate::errors::PoolError;
use crate::events::{LiquidityAdded, LiquidityRemoved};
use crate::state::Pool;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    self, Burn, Mint, MintTo, TokenAccount, TokenInterface, Transfer,
};

/// Add liquidity to the pool
pub fn deposit(
    ctx: Context<ManageLiquidity>,
    amount_a: u64,
    amount_b: u64,
    min_liquidity_out: u64,
) -> Result<()> {
    // Verify user has sufficient balance
    require!(
        ctx.accounts.user_token_a_account.amount >= amount_a,
        PoolError::InsufficientFunds
    );
    require!(
        ctx.accounts.user_token_b_account.amount >= amount_b,
        PoolError::InsufficientFunds
    );

    let vault_a_balance = ctx.accounts.token_a_vault.amount;
    let vault_b_balance = ctx.accounts.token_b_vault.amount;
    ctx.accounts
        .pool
        .sync_reserves(vault_a_balance, vault_b_balance);

    msg!(
        "Current vault balances - Token A: {}, Token B: {}",
        vault_a_balance,
        vault_b_balance
    );

    let quote = ctx
        .accounts
        .pool
        .quote_deposit(amount_a, amount_b, min_liquidity_out)?;

    // Transfer token A from user to vault
    token_interface::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_a_account.to_account_info(),
                to: ctx.accounts.token_a_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        quote.amount_a,
    )?;

    // Transfer token B from user to vault
    token_interface::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_token_b_account.to_account_info(),
                to: ctx.accounts.token_b_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        quote.amount_b,
    )?;

    // Mint LP tokens to user
    let seeds = ctx.accounts.pool.signer_seeds();
    let signer_seeds = &[&seeds[..]];
    token_interface::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.lp_mint.to_account_info(),
                to: ctx.accounts.user_lp_token_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        quote.shares,
    )?;

    ctx.accounts.pool.apply_deposit(&quote)?;

    msg!(
        "Liquidity added - Token A: {}, Token B: {}, LP tokens: {}",
        quote.amount_a,
        quote.amount_b,
        quote.shares
    );

    emit!(LiquidityAdded {
        pool: ctx.accounts.pool.key(),
        provider: ctx.accounts.user.key(),
        amount_a: quote.amount_a,
        amount_b: quote.amount_b,
        shares_minted: quote.shares,
    });

    Ok(())
}

/// Remove liquidity from the pool
pub fn withdraw(
    ctx: Context<ManageLiquidity>,
    shares: u64,
    min_amount_a: u64,
    min_amount_b: u64,
) -> Result<()> {
    // Verify user has sufficient LP tokens
    require!(
        ctx.accounts.user_lp_token_account.amount >= shares,
        PoolError::ExcessiveBurnAmount
    );

    let vault_a_balance = ctx.accounts.token_a_vault.amount;
    let vault_b_balance = ctx.accounts.token_b_vault.amount;
    ctx.accounts
        .pool
        .sync_reserves(vault_a_balance, vault_b_balance);

    let quote = ctx
        .accounts
        .pool
        .quote_withdraw(shares, min_amount_a, min_amount_b)?;

    // Burn LP tokens
    token_interface::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.lp_mint.to_account_info(),
                from: ctx.accounts.user_lp_token_account.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        quote.shares,
    )?;

    let seeds = ctx.accounts.pool.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    // Transfer token A from vault to user
    token_interface::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_a_vault.to_account_info(),
                to: ctx.accounts.user_token_a_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        quote.amount_a,
    )?;

    // Transfer token B from vault to user
    token_interface::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.token_b_vault.to_account_info(),
                to: ctx.accounts.user_token_b_account.to_account_info(),
                authority: ctx.accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        quote.amount_b,
    )?;

    ctx.accounts.pool.apply_withdraw(&quote)?;

    msg!(
        "Liquidity removed - Token A: {}, Token B: {}, LP tokens burned: {}",
        quote.amount_a,
        quote.amount_b,
        quote.shares
    );

    emit!(LiquidityRemoved {
        pool: ctx.accounts.pool.key(),
        provider: ctx.accounts.user.key(),
        amount_a: quote.amount_a,
        amount_b: quote.amount_b,
        shares_burned: quote.shares,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ManageLiquidity<'info> {
    /// Pool state account
    #[account(
        mut,
        seeds = [
            POOL_SEED,
            pool.token_a_mint.as_ref(),
            pool.token_b_mint.as_ref()
        ],
        bump = pool.bump,
        has_one = token_a_vault @ PoolError::InvalidPoolAccount,
        has_one = token_b_vault @ PoolError::InvalidPoolAccount,
        has_one = lp_mint @ PoolError::InvalidPoolAccount,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP token mint
    #[account(mut)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// User's token A account
    #[account(
        mut,
        token::mint = pool.token_a_mint,
        token::authority = user,
    )]
    pub user_token_a_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's token B account
    #[account(
        mut,
        token::mint = pool.token_b_mint,
        token::authority = user,
    )]
    pub user_token_b_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's LP token account
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = user,
    )]
    pub user_lp_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User authority
    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
