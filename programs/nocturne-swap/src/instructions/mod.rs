pub mod initialize_pool;
pub mod manage_liquidity;
pub mod swap;

pub use initialize_pool::*;
pub use manage_liquidity::*;
pub use swap::*;
