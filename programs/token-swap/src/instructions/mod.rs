pub mod collect_fees;
pub mod initialize_pool;
pub mod ledger;
pub mod manage_liquidity;
pub mod swap;

pub use collect_fees::*;
pub use initialize_pool::*;
pub use manage_liquidity::*;
pub use swap::*;
