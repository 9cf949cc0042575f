use crate::constants::{
    BPS_DENOMINATOR, LP_MINT_SEED, POOL_SEED, TOKEN_A_VAULT_SEED, TOKEN_B_VAULT_SEED,
};
use crate::errors::PoolError;
use crate::math;
use anchor_lang::prelude::*;

/// Which side of the pair the trader is selling.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

/// Stores the state of a two-token constant-product pool
#[account]
#[derive(Default, Debug, PartialEq, Eq, InitSpace)]
pub struct Pool {
    /// Signer that created the pool
    pub authority: Pubkey,

    /// Lower mint of the pair
    pub token_a_mint: Pubkey,

    /// Higher mint of the pair
    pub token_b_mint: Pubkey,

    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,

    /// Mint of the liquidity-share token
    pub lp_mint: Pubkey,

    pub reserve_a: u64,
    pub reserve_b: u64,

    /// Swap fee charged on input, out of 10000
    pub fee_rate_bps: u16,

    /// Liquidity shares outstanding, mirrors the LP mint supply
    pub total_liquidity_shares: u64,

    pub bump: u8,
    pub token_a_vault_bump: u8,
    pub token_b_vault_bump: u8,
    pub lp_mint_bump: u8,
}

/// Everything `Pool::initialize` writes.
#[derive(Clone, Copy, Debug)]
pub struct PoolParams {
    pub authority: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub token_a_vault: Pubkey,
    pub token_b_vault: Pubkey,
    pub lp_mint: Pubkey,
    pub fee_rate_bps: u16,
    pub bump: u8,
    pub token_a_vault_bump: u8,
    pub token_b_vault_bump: u8,
    pub lp_mint_bump: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositQuote {
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
}

impl Pool {
    /// A pool is live once its mints are recorded; the zero key is never a mint.
    pub fn is_initialized(&self) -> bool {
        self.token_a_mint != Pubkey::default()
    }

    pub fn initialize(&mut self, params: PoolParams) -> Result<()> {
        require!(!self.is_initialized(), PoolError::PoolAlreadyExists);
        require_keys_neq!(
            params.token_a_mint,
            params.token_b_mint,
            PoolError::IdenticalTokens
        );
        require!(
            params.token_a_mint < params.token_b_mint,
            PoolError::UnorderedTokenPair
        );
        require!(
            (params.fee_rate_bps as u64) < BPS_DENOMINATOR,
            PoolError::InvalidFeeRate
        );

        *self = Pool {
            authority: params.authority,
            token_a_mint: params.token_a_mint,
            token_b_mint: params.token_b_mint,
            token_a_vault: params.token_a_vault,
            token_b_vault: params.token_b_vault,
            lp_mint: params.lp_mint,
            reserve_a: 0,
            reserve_b: 0,
            fee_rate_bps: params.fee_rate_bps,
            total_liquidity_shares: 0,
            bump: params.bump,
            token_a_vault_bump: params.token_a_vault_bump,
            token_b_vault_bump: params.token_b_vault_bump,
            lp_mint_bump: params.lp_mint_bump,
        };
        Ok(())
    }

    /// Seeds the pool PDA signs with when moving vault funds or minting shares.
    pub fn signer_seeds(&self) -> [&[u8]; 4] {
        [
            POOL_SEED,
            self.token_a_mint.as_ref(),
            self.token_b_mint.as_ref(),
            std::slice::from_ref(&self.bump),
        ]
    }

    /// Adopt the vault balances as the reserves. Tokens sent straight to a
    /// vault are absorbed here, so quotes never run against stale figures.
    pub fn sync_reserves(&mut self, vault_a_balance: u64, vault_b_balance: u64) {
        self.reserve_a = vault_a_balance;
        self.reserve_b = vault_b_balance;
    }

    /// `(reserve_in, reserve_out)` for a trade in `direction`.
    pub fn reserves(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    /// `(mint_in, mint_out)` for a trade in `direction`.
    pub fn mints(&self, direction: SwapDirection) -> (Pubkey, Pubkey) {
        match direction {
            SwapDirection::AToB => (self.token_a_mint, self.token_b_mint),
            SwapDirection::BToA => (self.token_b_mint, self.token_a_mint),
        }
    }

    /// Product of the reserves, the curve invariant.
    pub fn invariant(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }

    pub fn quote_deposit(
        &self,
        amount_a: u64,
        amount_b: u64,
        min_liquidity_out: u64,
    ) -> Result<DepositQuote> {
        require!(amount_a > 0 && amount_b > 0, PoolError::ZeroAmount);

        let shares = if self.total_liquidity_shares == 0 {
            math::initial_shares(amount_a, amount_b)?
        } else {
            math::proportional_shares(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                self.total_liquidity_shares,
            )?
        };

        require!(shares > 0, PoolError::InsufficientLiquidityMinted);
        require!(
            shares >= min_liquidity_out,
            PoolError::InsufficientLiquidityMinted
        );

        Ok(DepositQuote {
            amount_a,
            amount_b,
            shares,
        })
    }

    pub fn apply_deposit(&mut self, quote: &DepositQuote) -> Result<()> {
        let reserve_a = self
            .reserve_a
            .checked_add(quote.amount_a)
            .ok_or(PoolError::MathOverflow)?;
        let reserve_b = self
            .reserve_b
            .checked_add(quote.amount_b)
            .ok_or(PoolError::MathOverflow)?;
        let total = self
            .total_liquidity_shares
            .checked_add(quote.shares)
            .ok_or(PoolError::MathOverflow)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_liquidity_shares = total;
        Ok(())
    }

    pub fn quote_withdraw(
        &self,
        shares: u64,
        min_amount_a: u64,
        min_amount_b: u64,
    ) -> Result<WithdrawQuote> {
        require!(shares > 0, PoolError::ZeroAmount);
        require!(
            shares <= self.total_liquidity_shares,
            PoolError::ExcessiveBurnAmount
        );

        let (amount_a, amount_b) = math::shares_to_amounts(
            shares,
            self.total_liquidity_shares,
            self.reserve_a,
            self.reserve_b,
        )?;

        require!(
            amount_a > 0 || amount_b > 0,
            PoolError::InsufficientLiquidity
        );
        require!(
            amount_a >= min_amount_a && amount_b >= min_amount_b,
            PoolError::SlippageExceeded
        );

        Ok(WithdrawQuote {
            shares,
            amount_a,
            amount_b,
        })
    }

    pub fn apply_withdraw(&mut self, quote: &WithdrawQuote) -> Result<()> {
        let reserve_a = self
            .reserve_a
            .checked_sub(quote.amount_a)
            .ok_or(PoolError::InsufficientLiquidity)?;
        let reserve_b = self
            .reserve_b
            .checked_sub(quote.amount_b)
            .ok_or(PoolError::InsufficientLiquidity)?;
        let total = self
            .total_liquidity_shares
            .checked_sub(quote.shares)
            .ok_or(PoolError::ExcessiveBurnAmount)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.total_liquidity_shares = total;
        Ok(())
    }

    pub fn quote_swap(
        &self,
        amount_in: u64,
        minimum_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<SwapQuote> {
        require!(amount_in > 0, PoolError::ZeroAmount);

        let (reserve_in, reserve_out) = self.reserves(direction);
        let (amount_in_after_fee, fee_amount) = math::apply_fee(amount_in, self.fee_rate_bps)?;
        let amount_out = math::swap_output(amount_in_after_fee, reserve_in, reserve_out)?;

        require!(amount_out > 0, PoolError::ZeroOutputAmount);
        require!(
            amount_out >= minimum_amount_out,
            PoolError::SlippageExceeded
        );

        // reserve_in must be able to absorb the full input
        reserve_in
            .checked_add(amount_in)
            .ok_or(PoolError::MathOverflow)?;

        Ok(SwapQuote {
            direction,
            amount_in,
            amount_out,
            fee_amount,
        })
    }

    pub fn apply_swap(&mut self, quote: &SwapQuote) -> Result<()> {
        let (reserve_in, reserve_out) = self.reserves(quote.direction);
        let reserve_in = reserve_in
            .checked_add(quote.amount_in)
            .ok_or(PoolError::MathOverflow)?;
        let reserve_out = reserve_out
            .checked_sub(quote.amount_out)
            .ok_or(PoolError::InsufficientLiquidity)?;

        match quote.direction {
            SwapDirection::AToB => {
                self.reserve_a = reserve_in;
                self.reserve_b = reserve_out;
            }
            SwapDirection::BToA => {
                self.reserve_b = reserve_in;
                self.reserve_a = reserve_out;
            }
        }
        Ok(())
    }
}

/// Order two mints so that `(a, b)` and `(b, a)` name the same pool.
pub fn canonical_pair(mint_x: Pubkey, mint_y: Pubkey) -> Result<(Pubkey, Pubkey)> {
    require_keys_neq!(mint_x, mint_y, PoolError::IdenticalTokens);
    Ok(if mint_x < mint_y {
        (mint_x, mint_y)
    } else {
        (mint_y, mint_x)
    })
}

/// Pool address for a pair of mints, in either order.
pub fn derive_pool_address(
    program_id: &Pubkey,
    mint_x: Pubkey,
    mint_y: Pubkey,
) -> Result<(Pubkey, u8)> {
    let (token_a_mint, token_b_mint) = canonical_pair(mint_x, mint_y)?;
    Ok(Pubkey::find_program_address(
        &[POOL_SEED, token_a_mint.as_ref(), token_b_mint.as_ref()],
        program_id,
    ))
}

pub fn derive_vault_addresses(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, Pubkey) {
    let (vault_a, _) =
        Pubkey::find_program_address(&[TOKEN_A_VAULT_SEED, pool.as_ref()], program_id);
    let (vault_b, _) =
        Pubkey::find_program_address(&[TOKEN_B_VAULT_SEED, pool.as_ref()], program_id);
    (vault_a, vault_b)
}

pub fn derive_lp_mint_address(program_id: &Pubkey, pool: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[LP_MINT_SEED, pool.as_ref()], program_id).0
}
