
use crate::constants::POOL_SEED;
use crate::errors::PoolError;
use crate::state::{
    derive_lp_mint_address, derive_vault_addresses, Pool, PoolParams, SwapDirection,
};
use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::*;
use std::collections::HashMap;

/// Token balances keyed by (holder, mint).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    balances: HashMap<(Pubkey, Pubkey), u64>,
}

impl Ledger {
    pub fn balance(&self, holder: Pubkey, mint: Pubkey) -> u64 {
        self.balances.get(&(holder, mint)).copied().unwrap_or(0)
    }

    pub fn mint_to(&mut self, holder: Pubkey, mint: Pubkey, amount: u64) {
        *self.balances.entry((holder, mint)).or_insert(0) += amount;
    }

    pub fn burn(&mut self, holder: Pubkey, mint: Pubkey, amount: u64) -> Result<()> {
        let balance = self.balance(holder, mint);
        require!(balance >= amount, PoolError::InsufficientFunds);
        self.balances.insert((holder, mint), balance - amount);
        Ok(())
    }

    pub fn transfer(&mut self, mint: Pubkey, from: Pubkey, to: Pubkey, amount: u64) -> Result<()> {
        let from_balance = self.balance(from, mint);
        require!(from_balance >= amount, PoolError::InsufficientFunds);
        let to_balance = self
            .balance(to, mint)
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        self.balances.insert((from, mint), from_balance - amount);
        self.balances.insert((to, mint), to_balance);
        Ok(())
    }
}

/// A pool plus the token accounts around it. Every operation follows the
/// instruction handlers step for step and rolls back on error the way a
/// failed transaction does.
#[derive(Clone, Debug)]
pub struct TestPool {
    pub address: Pubkey,
    pub bump: u8,
    pub mints: (Pubkey, Pubkey),
    pub pool: Pool,
    pub ledger: Ledger,
}

impl TestPool {
    pub fn new(fee_rate_bps: u16) -> Self {
        let (token_a_mint, token_b_mint) = sorted_mints();
        let mut test_pool = Self::uninitialized(token_a_mint, token_b_mint);
        test_pool
            .initialize(Pubkey::new_unique(), fee_rate_bps)
            .expect("pool initializes");
        test_pool
    }

    /// Zeroed pool record at the address seeded by the mints in the given order.
    pub fn uninitialized(token_a_mint: Pubkey, token_b_mint: Pubkey) -> Self {
        let (address, bump) = Pubkey::find_program_address(
            &[POOL_SEED, token_a_mint.as_ref(), token_b_mint.as_ref()],
            &crate::id(),
        );
        Self {
            address,
            bump,
            mints: (token_a_mint, token_b_mint),
            pool: Pool::default(),
            ledger: Ledger::default(),
        }
    }

    pub fn initialize(&mut self, authority: Pubkey, fee_rate_bps: u16) -> Result<()> {
        let program_id = crate::id();
        let (token_a_vault, token_b_vault) = derive_vault_addresses(&program_id, &self.address);
        let params = PoolParams {
            authority,
            token_a_mint: self.mints.0,
            token_b_mint: self.mints.1,
            token_a_vault,
            token_b_vault,
            lp_mint: derive_lp_mint_address(&program_id, &self.address),
            fee_rate_bps,
            bump: self.bump,
            token_a_vault_bump: 0,
            token_b_vault_bump: 0,
            lp_mint_bump: 0,
        };
        self.atomically(|t| t.pool.initialize(params))
    }

    pub fn token_a(&self) -> Pubkey {
        self.pool.token_a_mint
    }

    pub fn token_b(&self) -> Pubkey {
        self.pool.token_b_mint
    }

    pub fn vault_balances(&self) -> (u64, u64) {
        (
            self.ledger.balance(self.pool.token_a_vault, self.pool.token_a_mint),
            self.ledger.balance(self.pool.token_b_vault, self.pool.token_b_mint),
        )
    }

    pub fn lp_balance(&self, user: Pubkey) -> u64 {
        self.ledger.balance(user, self.pool.lp_mint)
    }

    /// New wallet holding `amount_a` of token A and `amount_b` of token B.
    pub fn funded_user(&mut self, amount_a: u64, amount_b: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.ledger.mint_to(user, self.pool.token_a_mint, amount_a);
        self.ledger.mint_to(user, self.pool.token_b_mint, amount_b);
        user
    }

    fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let pool = self.pool.clone();
        let ledger = self.ledger.clone();
        let result = op(self);
        if result.is_err() {
            self.pool = pool;
            self.ledger = ledger;
        }
        result
    }

    fn sync(&mut self) {
        let (vault_a, vault_b) = self.vault_balances();
        self.pool.sync_reserves(vault_a, vault_b);
    }

    pub fn add_liquidity(
        &mut self,
        user: Pubkey,
        amount_a: u64,
        amount_b: u64,
        min_liquidity_out: u64,
    ) -> Result<u64> {
        self.atomically(|t| {
            let pool = t.pool.clone();
            require!(
                t.ledger.balance(user, pool.token_a_mint) >= amount_a,
                PoolError::InsufficientFunds
            );
            require!(
                t.ledger.balance(user, pool.token_b_mint) >= amount_b,
                PoolError::InsufficientFunds
            );

            t.sync();
            let quote = t.pool.quote_deposit(amount_a, amount_b, min_liquidity_out)?;
            t.ledger
                .transfer(pool.token_a_mint, user, pool.token_a_vault, quote.amount_a)?;
            t.ledger
                .transfer(pool.token_b_mint, user, pool.token_b_vault, quote.amount_b)?;
            t.ledger.mint_to(user, pool.lp_mint, quote.shares);
            t.pool.apply_deposit(&quote)?;
            Ok(quote.shares)
        })
    }

    pub fn remove_liquidity(
        &mut self,
        user: Pubkey,
        shares: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<(u64, u64)> {
        self.atomically(|t| {
            let pool = t.pool.clone();
            require!(
                t.ledger.balance(user, pool.lp_mint) >= shares,
                PoolError::ExcessiveBurnAmount
            );

            t.sync();
            let quote = t.pool.quote_withdraw(shares, min_amount_a, min_amount_b)?;
            t.ledger.burn(user, pool.lp_mint, quote.shares)?;
            t.ledger
                .transfer(pool.token_a_mint, pool.token_a_vault, user, quote.amount_a)?;
            t.ledger
                .transfer(pool.token_b_mint, pool.token_b_vault, user, quote.amount_b)?;
            t.pool.apply_withdraw(&quote)?;
            Ok((quote.amount_a, quote.amount_b))
        })
    }

    pub fn swap(
        &mut self,
        user: Pubkey,
        amount_in: u64,
        minimum_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<u64> {
        self.atomically(|t| {
            let (mint_in, mint_out) = t.pool.mints(direction);
            let (vault_in, vault_out) = match direction {
                SwapDirection::AToB => (t.pool.token_a_vault, t.pool.token_b_vault),
                SwapDirection::BToA => (t.pool.token_b_vault, t.pool.token_a_vault),
            };
            require!(
                t.ledger.balance(user, mint_in) >= amount_in,
                PoolError::InsufficientFunds
            );

            t.sync();

            let quote = t.pool.quote_swap(amount_in, minimum_amount_out, direction)?;
            t.ledger.transfer(mint_in, user, vault_in, quote.amount_in)?;
            t.ledger.transfer(mint_out, vault_out, user, quote.amount_out)?;
            t.pool.apply_swap(&quote)?;
            Ok(quote.amount_out)
        })
    }
}

pub fn sorted_mints() -> (Pubkey, Pubkey) {
    let x = Pubkey::new_unique();
    let y = Pubkey::new_unique();
    if x < y {
        (x, y)
    } else {
        (y, x)
    }
}

pub fn error_code(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

#[track_caller]
pub fn assert_pool_error<T: std::fmt::Debug>(result: Result<T>, expected: PoolError) {
    let err = result.expect_err("operation should fail");
    assert_eq!(
        error_code(&err),
        Some(ERROR_CODE_OFFSET + expected as u32),
        "unexpected error: {err:?}"
    );
}
