use anchor_lang::prelude::*;

/// Errors returned by every fallible computation in the crate.
///
/// The enum is an anchor `#[error_code]`, so an on-chain caller can lift any variant into
/// a program error with `?` while the pure math keeps a typed `Result<T, ErrorCode>`.
#[error_code]
#[derive(PartialEq)]
pub enum ErrorCode {
    /// An intermediate or final value exceeded its declared bit width
    #[msg("Arithmetic overflow")]
    Overflow,

    /// A token amount does not fit in 64 bits
    #[msg("Token amount exceeds u64")]
    AmountOverflow,

    /// A divisor was zero
    #[msg("Division by zero")]
    DivideByZero,

    /// A requested or computed sqrt price lies outside [MIN_SQRT_PRICE, MAX_SQRT_PRICE]
    #[msg("Sqrt price is outside of the supported range")]
    PriceLimitExceeded,

    /// The sqrt price limit lies on the wrong side of the current price for the swap direction
    #[msg("Sqrt price limit is on the wrong side of the current price")]
    InvalidSqrtPriceLimitDirection,

    /// The sqrt price passed to a pool is zero or outside of bounds
    #[msg("Invalid sqrt price")]
    InvalidSqrtPrice,

    /// Tick index is out of bounds or not aligned to the tick spacing
    #[msg("Invalid tick index")]
    InvalidTickIndex,

    /// Tick spacing must be strictly positive
    #[msg("Invalid tick spacing")]
    InvalidTickSpacing,

    /// Upper tick lies below the lower tick
    #[msg("Invalid tick range: upper tick is below lower tick")]
    InvalidTickRange,

    /// Tick array start index is not a multiple of TICK_ARRAY_SIZE * tick_spacing
    #[msg("Invalid tick array start index")]
    InvalidTickArrayStart,

    /// Tick index is outside of the array's range or not a multiple of the tick spacing
    #[msg("Tick not found in tick array")]
    TickNotInArray,

    /// Tick arrays passed to a swap are empty, too many, mis-spaced or out of order
    #[msg("Invalid tick array sequence")]
    InvalidTickArraySequence,

    /// The loaded tick arrays were exhausted before the swap completed
    #[msg("Insufficient liquidity in the supplied tick arrays")]
    InsufficientLiquidity,

    /// Crossing a tick would drive active liquidity below zero
    #[msg("Corrupted tick data: liquidity would become negative")]
    CorruptedTickData,

    /// Liquidity delta must be non-zero
    #[msg("Liquidity amount must be greater than zero")]
    LiquidityZero,

    /// Liquidity would exceed u128
    #[msg("Liquidity overflow")]
    LiquidityOverflow,

    /// Liquidity would fall below zero
    #[msg("Liquidity underflow")]
    LiquidityUnderflow,

    /// Tick liquidity_net left the i128 range
    #[msg("Liquidity net overflow")]
    LiquidityNetError,

    /// A swap must trade a non-zero amount
    #[msg("Swap amount must be greater than zero")]
    ZeroTradableAmount,

    /// Fee rate exceeds MAX_FEE_RATE
    #[msg("Fee rate exceeds maximum")]
    InvalidFeeRate,

    /// Protocol fee rate exceeds MAX_PROTOCOL_FEE_RATE
    #[msg("Protocol fee rate exceeds maximum")]
    InvalidProtocolFeeRate,

    /// The token mint does not belong to the pool
    #[msg("Input token mint does not match either pool token")]
    InvalidInputTokenMint,

    /// Slippage tolerance has a zero denominator
    #[msg("Invalid slippage tolerance")]
    InvalidSlippage,

    /// Loans must be taken from a range entirely above or below the current tick
    #[msg("Loan range must not contain the current tick")]
    InvalidLoanRange,

    /// The ticks bounding the loan do not hold enough liquidity
    #[msg("Insufficient liquidity to borrow")]
    InsufficientLiquidityToBorrow,

    /// The loan range pays out the pool token that is not the position's loan mint
    #[msg("Loan range does not pay out the loan token")]
    LoanTokenMismatch,

    /// Borrowed amount must be non-zero
    #[msg("Borrowable amount must be greater than zero")]
    ZeroBorrowableAmount,

    /// The trade position has no open trade
    #[msg("Trade position is not open")]
    TradePositionNotOpen,

    /// Closing the trade would need swaps into both pool tokens
    #[msg("Invalid repayment amount, both token A and B needed")]
    InvalidRepaymentAmount,
}
