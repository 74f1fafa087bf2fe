//! Genesis parameters and hard bounds for the fee token.

/// 10^18 base units per whole token.
pub const SCALING_FACTOR: u128 = 1_000_000_000_000_000_000u128;

/// Fixed supply minted to the deployer: 1 000 000 000 tokens.
pub const TOTAL_SUPPLY: u128 = 1_000_000_000 * SCALING_FACTOR;

pub const DECIMALS: u8 = 18;

// ── Fees (percentage points) ──────────────────────────────────────────────

pub const DEFAULT_MARKETING_FEE: u8 = 2;
pub const DEFAULT_LIQUIDITY_FEE: u8 = 3;

/// Combined marketing + liquidity fee may never exceed 10%.
pub const MAX_TOTAL_FEE: u16 = 10;

/// Fee rates are whole percents.
pub const FEE_DENOMINATOR: u128 = 100;

// ── Caps ──────────────────────────────────────────────────────────────────

/// Genesis max transaction: 1% of supply.
pub const DEFAULT_MAX_TX_PERCENT: u128 = 1;

/// Genesis max wallet: 2% of supply.
pub const DEFAULT_MAX_WALLET_PERCENT: u128 = 2;

/// Neither cap may be set below `total_supply / LIMIT_FLOOR_DIVISOR` (0.1%).
pub const LIMIT_FLOOR_DIVISOR: u128 = 1_000;

/// The null account. Rejected as a marketing wallet, recipient or spender.
pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];
