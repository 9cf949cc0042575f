use crate::constants::POOL_SEED;
use crate::errors::PoolError;
use crate::events::SwapEvent;
use crate::state::{Pool, SwapDirection};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, TokenAccount, TokenInterface, Transfer};

/// Swap tokens using constant product AMM formula (x * y = k)
pub fn process(
    ctx: Context<Swap>,
    amount_in: u64,
    minimum_amount_out: u64,
    direction: SwapDirection,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;

    // Verify user has sufficient input tokens
    let user_in_balance = match direction {
        SwapDirection::AToB => accounts.user_token_a_account.amount,
        SwapDirection::BToA => accounts.user_token_b_account.amount,
    };
    require!(user_in_balance >= amount_in, PoolError::InsufficientFunds);

    let vault_a_balance = accounts.token_a_vault.amount;
    let vault_b_balance = accounts.token_b_vault.amount;
    accounts.pool.sync_reserves(vault_a_balance, vault_b_balance);

    let (user_in, user_out, vault_in, vault_out) = match direction {
        SwapDirection::AToB => (
            &accounts.user_token_a_account,
            &accounts.user_token_b_account,
            &accounts.token_a_vault,
            &accounts.token_b_vault,
        ),
        SwapDirection::BToA => (
            &accounts.user_token_b_account,
            &accounts.user_token_a_account,
            &accounts.token_b_vault,
            &accounts.token_a_vault,
        ),
    };

    let quote = accounts
        .pool
        .quote_swap(amount_in, minimum_amount_out, direction)?;

    msg!(
        "Swap details - Input: {}, Fee: {}, Output: {}",
        quote.amount_in,
        quote.fee_amount,
        quote.amount_out
    );

    // Transfer input tokens from user to vault (including fee)
    token_interface::transfer(
        CpiContext::new(
            accounts.token_program.to_account_info(),
            Transfer {
                from: user_in.to_account_info(),
                to: vault_in.to_account_info(),
                authority: accounts.user.to_account_info(),
            },
        ),
        quote.amount_in,
    )?;

    // Transfer output tokens from vault to user
    let seeds = accounts.pool.signer_seeds();
    let signer_seeds = &[&seeds[..]];
    token_interface::transfer(
        CpiContext::new_with_signer(
            accounts.token_program.to_account_info(),
            Transfer {
                from: vault_out.to_account_info(),
                to: user_out.to_account_info(),
                authority: accounts.pool.to_account_info(),
            },
            signer_seeds,
        ),
        quote.amount_out,
    )?;

    accounts.pool.apply_swap(&quote)?;

    let (token_in, token_out) = accounts.pool.mints(direction);
    emit!(SwapEvent {
        pool: accounts.pool.key(),
        user: accounts.user.key(),
        token_in,
        token_out,
        amount_in: quote.amount_in,
        amount_out: quote.amount_out,
        fee_amount: quote.fee_amount,
    });

    msg!(
        "Swap completed - Input: {}, Output: {}",
        quote.amount_in,
        quote.amount_out
    );

    Ok(())
}

#[derive(Accounts)]
pub struct Swap<'info> {
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
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub token_a_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub token_b_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// User's token A account, debited or credited depending on direction
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

    /// User authority
    pub user: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}
