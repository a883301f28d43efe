use anchor_lang::prelude::*;

#[error_code]
pub enum SwapError {
    #[msg("Swap pool is already initialized")]
    AlreadyInitialized,

    #[msg("Swap pool has not been initialized")]
    Uninitialized,

    #[msg("Pool does not hold enough liquidity for this operation")]
    InsufficientLiquidity,

    #[msg("Resulting amount is beyond the requested slippage bound")]
    SlippageExceeded,

    #[msg("Token amounts do not match the pool ratio")]
    InvalidRatio,

    #[msg("Arithmetic overflow in amount calculation")]
    OverflowError,

    #[msg("Fee numerator exceeds its denominator")]
    InvalidFeeFraction,

    #[msg("Operation would move zero trading tokens")]
    ZeroTradingTokens,

    #[msg("Pool state changed since it was read")]
    StaleState,

    #[msg("Account does not belong to this swap pool")]
    IncorrectSwapAccount,
}

#[cfg(test)]
pub(crate) fn assert_swap_error<T: std::fmt::Debug>(result: Result<T>, expected: SwapError) {
    assert_eq!(result.unwrap_err(), anchor_lang::error::Error::from(expected));
}
