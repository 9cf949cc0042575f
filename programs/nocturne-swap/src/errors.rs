use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Token pair must consist of two distinct mints")]
    IdenticalTokens,

    #[msg("Token mints must be passed in canonical (ascending) order")]
    UnorderedTokenPair,

    #[msg("Fee rate must be below 10000 basis points")]
    InvalidFeeRate,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("A pool for this token pair already exists")]
    PoolAlreadyExists,

    #[msg("Output amount is less than the specified minimum")]
    SlippageExceeded,

    #[msg("Minted liquidity is below the requested minimum")]
    InsufficientLiquidityMinted,

    #[msg("Insufficient balance in user's account for this operation")]
    InsufficientFunds,

    #[msg("Pool reserves cannot cover this operation")]
    InsufficientLiquidity,

    #[msg("Swap amount is too small to produce any output")]
    ZeroOutputAmount,

    #[msg("Attempting to burn more liquidity shares than available")]
    ExcessiveBurnAmount,

    #[msg("Account does not belong to this pool")]
    InvalidPoolAccount,

    #[msg("Arithmetic overflow")]
    MathOverflow,
}
