/// Every way a fee-token message can be rejected.
///
/// All variants are terminal for the triggering call: the host reverts the
/// message and no partial state survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Error {
    /// Transfers are halted.
    Paused,
    /// `unpause` was called while the token was running.
    NotPaused,
    /// Sender or recipient is blacklisted.
    Blacklisted,
    /// Amount is above `max_transaction_amount`.
    ExceedsMaxTransaction,
    /// Recipient balance would rise above `max_wallet_size`.
    ExceedsMaxWallet,
    /// The all-zero account was supplied where a real account is required.
    ZeroAddress,
    /// Marketing + liquidity fee would exceed 10%.
    FeeTooHigh,
    /// A cap was set below 0.1% of total supply.
    LimitTooLow,
    /// Caller lacks the required role.
    Unauthorized,
    InsufficientBalance,
    InsufficientAllowance,
    /// An arithmetic operation overflowed.
    Overflow,
    /// A balance-changing entry point was re-entered mid-operation.
    ReentrantCall,
}

pub type Result<T> = core::result::Result<T, Error>;
