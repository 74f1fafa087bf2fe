//! Transfer policy: the decision run before every balance change.
//!
//! `decide` never writes. It reads a [`PolicyContext`] snapshot and either
//! rejects the operation or returns the ledger movements that realise it:
//!
//! ```text
//!   paused?                  → Err(Paused)
//!   mint / burn (None side)  → Plain
//!   blacklisted party?       → Err(Blacklisted)
//!   either party exempt      → Plain            (no caps, no fee)
//!   amount > max_tx          → Err(ExceedsMaxTransaction)
//!   to_bal + amount > max_w  → Err(ExceedsMaxWallet)
//!   fee == 0                 → Plain
//!   otherwise                → Split [marketing, liquidity, net]
//! ```

use ink::primitives::AccountId;

use crate::constants::{
    DEFAULT_LIQUIDITY_FEE, DEFAULT_MARKETING_FEE, DEFAULT_MAX_TX_PERCENT,
    DEFAULT_MAX_WALLET_PERCENT, FEE_DENOMINATOR, LIMIT_FLOOR_DIVISOR, MAX_TOTAL_FEE,
};
use crate::errors::{Error, Result};

pub type Balance = u128;

/// One ledger mutation. `None` on either side is the null account: a `None`
/// source mints, a `None` destination burns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub struct Movement {
    pub from: Option<AccountId>,
    pub to: Option<AccountId>,
    pub amount: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum Decision {
    /// Move the full amount unchanged.
    Plain(Movement),
    /// Marketing cut, liquidity cut, then the net amount, applied in that order.
    Split([Movement; 3]),
}

impl Decision {
    pub fn movements(&self) -> &[Movement] {
        match self {
            Decision::Plain(movement) => core::slice::from_ref(movement),
            Decision::Split(movements) => movements,
        }
    }

    /// Total withheld from the recipient.
    pub fn fee(&self) -> Balance {
        match self {
            Decision::Plain(_) => 0,
            Decision::Split([marketing, liquidity, _]) => {
                marketing.amount.saturating_add(liquidity.amount)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct FeeConfig {
    /// Whole percent of each taxed transfer sent to `marketing_wallet`.
    pub marketing_fee: u8,
    /// Whole percent of each taxed transfer kept by the contract.
    pub liquidity_fee: u8,
    pub marketing_wallet: AccountId,
}

impl FeeConfig {
    pub fn genesis(marketing_wallet: AccountId) -> Self {
        Self {
            marketing_fee: DEFAULT_MARKETING_FEE,
            liquidity_fee: DEFAULT_LIQUIDITY_FEE,
            marketing_wallet,
        }
    }

    /// Rejects any pair whose sum exceeds [`MAX_TOTAL_FEE`].
    pub fn check_rates(marketing_fee: u8, liquidity_fee: u8) -> Result<()> {
        if u16::from(marketing_fee) + u16::from(liquidity_fee) > MAX_TOTAL_FEE {
            return Err(Error::FeeTooHigh);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct LimitConfig {
    pub max_transaction_amount: Balance,
    pub max_wallet_size: Balance,
}

impl LimitConfig {
    pub fn genesis(total_supply: Balance) -> Self {
        Self {
            max_transaction_amount: total_supply / 100 * DEFAULT_MAX_TX_PERCENT,
            max_wallet_size: total_supply / 100 * DEFAULT_MAX_WALLET_PERCENT,
        }
    }

    /// Builds a new cap pair, refusing either value below 0.1% of supply.
    pub fn checked(
        max_transaction_amount: Balance,
        max_wallet_size: Balance,
        total_supply: Balance,
    ) -> Result<Self> {
        let floor = Self::floor(total_supply);
        if max_transaction_amount < floor || max_wallet_size < floor {
            return Err(Error::LimitTooLow);
        }
        Ok(Self {
            max_transaction_amount,
            max_wallet_size,
        })
    }

    pub fn floor(total_supply: Balance) -> Balance {
        total_supply / LIMIT_FLOOR_DIVISOR
    }
}

/// Read-only view of everything the policy consults.
///
/// The balance must be the one held before the operation under decision.
pub trait PolicyContext {
    fn is_paused(&self) -> bool;
    fn is_blacklisted(&self, account: &AccountId) -> bool;
    fn is_fee_exempt(&self, account: &AccountId) -> bool;
    fn balance(&self, account: &AccountId) -> Balance;
    fn fee_config(&self) -> FeeConfig;
    fn limits(&self) -> LimitConfig;
    /// Receives the liquidity cut.
    fn contract_address(&self) -> AccountId;
}

/// Decide how `amount` moves from `from` to `to`, or why it may not.
pub fn decide<C: PolicyContext + ?Sized>(
    ctx: &C,
    from: Option<AccountId>,
    to: Option<AccountId>,
    amount: Balance,
) -> Result<Decision> {
    if ctx.is_paused() {
        return Err(Error::Paused);
    }

    let plain = Decision::Plain(Movement { from, to, amount });

    let (sender, recipient) = match (from, to) {
        (Some(sender), Some(recipient)) => (sender, recipient),
        _ => return Ok(plain),
    };

    if ctx.is_blacklisted(&sender) || ctx.is_blacklisted(&recipient) {
        return Err(Error::Blacklisted);
    }

    // One exempt party waives both caps and the fee.
    if ctx.is_fee_exempt(&sender) || ctx.is_fee_exempt(&recipient) {
        return Ok(plain);
    }

    let limits = ctx.limits();
    if amount > limits.max_transaction_amount {
        return Err(Error::ExceedsMaxTransaction);
    }
    if ctx.balance(&recipient).saturating_add(amount) > limits.max_wallet_size {
        return Err(Error::ExceedsMaxWallet);
    }

    let fees = ctx.fee_config();
    let (marketing, liquidity, net) = fee_breakdown(&fees, amount)?;
    if marketing == 0 && liquidity == 0 {
        return Ok(plain);
    }

    Ok(Decision::Split([
        Movement {
            from,
            to: Some(fees.marketing_wallet),
            amount: marketing,
        },
        Movement {
            from,
            to: Some(ctx.contract_address()),
            amount: liquidity,
        },
        Movement {
            from,
            to,
            amount: net,
        },
    ]))
}

/// `(marketing, liquidity, net)` for a taxed transfer of `amount`.
///
/// Both cuts round down; the remainder stays with the recipient, so the three
/// parts always sum to `amount`.
pub fn fee_breakdown(fees: &FeeConfig, amount: Balance) -> Result<(Balance, Balance, Balance)> {
    let marketing = percent_of(amount, fees.marketing_fee)?;
    let liquidity = percent_of(amount, fees.liquidity_fee)?;
    let net = amount
        .checked_sub(marketing)
        .and_then(|rest| rest.checked_sub(liquidity))
        .ok_or(Error::Overflow)?;
    Ok((marketing, liquidity, net))
}

/// `floor(amount * rate / 100)`, split into whole hundreds and remainder so
/// the product never has to fit in `u128`.
fn percent_of(amount: Balance, rate: u8) -> Result<Balance> {
    let rate = Balance::from(rate);
    let whole = (amount / FEE_DENOMINATOR)
        .checked_mul(rate)
        .ok_or(Error::Overflow)?;
    let rest = (amount % FEE_DENOMINATOR) * rate / FEE_DENOMINATOR;
    whole.checked_add(rest).ok_or(Error::Overflow)
}
