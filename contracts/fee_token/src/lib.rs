#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod policy;
pub mod roles;

pub use errors::{Error, Result};

/// # Fee Token
///
/// PSP22-shaped fungible token with a transfer policy layered over the
/// ledger: marketing and liquidity fees, per-transaction and per-wallet
/// caps, a blacklist, fee exemptions, a pause switch and role-gated admin.
///
/// ## Balance-change pipeline
///
/// Every mint, transfer and burn goes through one path:
///
/// ```text
///   entry point ──► policy::decide ──► ledger::stage ──► commit + events
///                   (reject or plan)   (validate all)    (write all)
/// ```
///
/// A taxed transfer of 1 000 units at the default 2% / 3% becomes:
///
/// ```text
///   from → marketing_wallet    20
///   from → contract            30
///   from → to                 950
/// ```
///
/// Fee-exempt accounts from construction: deployer, contract, marketing wallet.
#[ink::contract]
mod fee_token {
    use crate::constants::*;
    use crate::errors::{Error, Result};
    use crate::ledger;
    use crate::policy::{self, Decision, FeeConfig, LimitConfig, PolicyContext};
    use crate::roles::Role;
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct FeeToken {
        // ── Token metadata ────────────────────────────────────────────────
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: Balance,

        // ── Ledger ────────────────────────────────────────────────────────
        balances: Mapping<AccountId, Balance>,
        allowances: Mapping<(AccountId, AccountId), Balance>,

        // ── Access control ────────────────────────────────────────────────
        roles: Mapping<(Role, AccountId), bool>,

        // ── Transfer policy ───────────────────────────────────────────────
        blacklisted: Mapping<AccountId, bool>,
        excluded_from_fee: Mapping<AccountId, bool>,
        fees: FeeConfig,
        limits: LimitConfig,

        // ── Safety ───────────────────────────────────────────────────────
        paused: bool,
        /// Set while a balance-changing message is executing.
        entered: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        spender: AccountId,
        value: Balance,
    }

    #[ink(event)]
    pub struct MarketingWalletUpdated {
        #[ink(topic)]
        previous: AccountId,
        #[ink(topic)]
        updated: AccountId,
    }

    #[ink(event)]
    pub struct FeesUpdated {
        previous_marketing_fee: u8,
        previous_liquidity_fee: u8,
        marketing_fee: u8,
        liquidity_fee: u8,
    }

    #[ink(event)]
    pub struct LimitsUpdated {
        previous_max_transaction_amount: Balance,
        previous_max_wallet_size: Balance,
        max_transaction_amount: Balance,
        max_wallet_size: Balance,
    }

    #[ink(event)]
    pub struct BlacklistUpdated {
        #[ink(topic)]
        account: AccountId,
        blacklisted: bool,
    }

    #[ink(event)]
    pub struct Paused {
        account: AccountId,
    }

    #[ink(event)]
    pub struct Unpaused {
        account: AccountId,
    }

    #[ink(event)]
    pub struct RoleGranted {
        role: Role,
        #[ink(topic)]
        account: AccountId,
        #[ink(topic)]
        sender: AccountId,
    }

    #[ink(event)]
    pub struct RoleRevoked {
        role: Role,
        #[ink(topic)]
        account: AccountId,
        #[ink(topic)]
        sender: AccountId,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl FeeToken {
        /// Deploy the token and mint the full supply to the caller.
        ///
        /// The caller receives both roles. Caller, contract and
        /// `marketing_wallet` start fee-exempt.
        ///
        /// # Errors
        /// - [`Error::ZeroAddress`] — `marketing_wallet` is the null account.
        #[ink(constructor)]
        pub fn new(name: String, symbol: String, marketing_wallet: AccountId) -> Result<Self> {
            if marketing_wallet == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }

            let deployer = Self::env().caller();
            let contract = Self::env().account_id();

            let mut token = Self {
                name,
                symbol,
                decimals: DECIMALS,
                total_supply: 0,
                balances: Mapping::default(),
                allowances: Mapping::default(),
                roles: Mapping::default(),
                blacklisted: Mapping::default(),
                excluded_from_fee: Mapping::default(),
                fees: FeeConfig::genesis(marketing_wallet),
                limits: LimitConfig::genesis(TOTAL_SUPPLY),
                paused: false,
                entered: false,
            };

            token.grant_role_internal(Role::DefaultAdmin, deployer, deployer);
            token.grant_role_internal(Role::Admin, deployer, deployer);

            for account in [deployer, contract, marketing_wallet] {
                token.excluded_from_fee.insert(account, &true);
            }

            token.update(None, Some(deployer), TOTAL_SUPPLY)?;
            Ok(token)
        }

        // =====================================================================
        // PSP22 — Standard Token Interface
        // =====================================================================

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.balances.get(owner).unwrap_or(0)
        }

        #[ink(message)]
        pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
            self.allowances.get((owner, spender)).unwrap_or(0)
        }

        /// Move `value` from the caller to `to`, subject to the transfer policy.
        ///
        /// The recipient may receive less than `value` when a fee applies.
        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<()> {
            let from = self.env().caller();
            self.non_reentrant(|token| token.transfer_impl(from, to, value))
        }

        #[ink(message)]
        pub fn approve(&mut self, spender: AccountId, value: Balance) -> Result<()> {
            Self::ensure_not_zero(spender)?;
            let owner = self.env().caller();
            self.allowances.insert((owner, spender), &value);
            self.env().emit_event(Approval { owner, spender, value });
            Ok(())
        }

        /// Spend the caller's allowance over `from` to move `value` to `to`.
        ///
        /// An allowance of `Balance::MAX` is treated as unlimited and never
        /// decremented. The allowance is only written once the transfer has
        /// cleared.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            value: Balance,
        ) -> Result<()> {
            let spender = self.env().caller();
            self.non_reentrant(|token| {
                let current = token.allowance(from, spender);
                if current < value {
                    return Err(Error::InsufficientAllowance);
                }
                token.transfer_impl(from, to, value)?;
                if current != Balance::MAX {
                    token
                        .allowances
                        .insert((from, spender), &current.saturating_sub(value));
                }
                Ok(())
            })
        }

        /// Destroy `value` of the caller's tokens.
        ///
        /// Burns bypass blacklist, caps and fees but not the pause switch.
        #[ink(message)]
        pub fn burn(&mut self, value: Balance) -> Result<()> {
            let from = self.env().caller();
            self.non_reentrant(|token| token.update(Some(from), None, value))
        }

        // =====================================================================
        // POLICY VIEWS
        // =====================================================================

        #[ink(message)]
        pub fn marketing_wallet(&self) -> AccountId {
            self.fees.marketing_wallet
        }

        /// `(marketing_fee, liquidity_fee)` in whole percent.
        #[ink(message)]
        pub fn fees(&self) -> (u8, u8) {
            (self.fees.marketing_fee, self.fees.liquidity_fee)
        }

        #[ink(message)]
        pub fn max_transaction_amount(&self) -> Balance {
            self.limits.max_transaction_amount
        }

        #[ink(message)]
        pub fn max_wallet_size(&self) -> Balance {
            self.limits.max_wallet_size
        }

        #[ink(message)]
        pub fn is_blacklisted(&self, account: AccountId) -> bool {
            self.blacklisted.get(account).unwrap_or(false)
        }

        #[ink(message)]
        pub fn is_excluded_from_fee(&self, account: AccountId) -> bool {
            self.excluded_from_fee.get(account).unwrap_or(false)
        }

        #[ink(message)]
        pub fn paused(&self) -> bool {
            self.paused
        }

        /// `(marketing, liquidity, net)` a taxed transfer of `amount` would
        /// produce at the current rates.
        #[ink(message)]
        pub fn calculate_fees(&self, amount: Balance) -> Result<(Balance, Balance, Balance)> {
            policy::fee_breakdown(&self.fees, amount)
        }

        /// Dry-run the transfer policy without touching balances.
        #[ink(message)]
        pub fn preview_transfer(
            &self,
            from: Option<AccountId>,
            to: Option<AccountId>,
            amount: Balance,
        ) -> Result<Decision> {
            policy::decide(self, from, to, amount)
        }

        // =====================================================================
        // ADMIN — Transfer Policy
        // =====================================================================

        /// # Errors
        /// - [`Error::Unauthorized`] — caller lacks [`Role::Admin`].
        /// - [`Error::ZeroAddress`]  — `wallet` is the null account.
        #[ink(message)]
        pub fn set_marketing_wallet(&mut self, wallet: AccountId) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            Self::ensure_not_zero(wallet)?;
            let previous = self.fees.marketing_wallet;
            self.fees.marketing_wallet = wallet;
            self.env().emit_event(MarketingWalletUpdated {
                previous,
                updated: wallet,
            });
            Ok(())
        }

        /// Replace both fee rates at once.
        ///
        /// # Errors
        /// - [`Error::Unauthorized`] — caller lacks [`Role::Admin`].
        /// - [`Error::FeeTooHigh`]   — `marketing_fee + liquidity_fee > 10`.
        #[ink(message)]
        pub fn set_fees(&mut self, marketing_fee: u8, liquidity_fee: u8) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            FeeConfig::check_rates(marketing_fee, liquidity_fee)?;
            let previous = self.fees;
            self.fees.marketing_fee = marketing_fee;
            self.fees.liquidity_fee = liquidity_fee;
            self.env().emit_event(FeesUpdated {
                previous_marketing_fee: previous.marketing_fee,
                previous_liquidity_fee: previous.liquidity_fee,
                marketing_fee,
                liquidity_fee,
            });
            Ok(())
        }

        /// Replace both caps at once.
        ///
        /// # Errors
        /// - [`Error::Unauthorized`] — caller lacks [`Role::Admin`].
        /// - [`Error::LimitTooLow`]  — either cap is below `total_supply / 1000`.
        #[ink(message)]
        pub fn set_max_limits(
            &mut self,
            max_transaction_amount: Balance,
            max_wallet_size: Balance,
        ) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            let previous = self.limits;
            self.limits =
                LimitConfig::checked(max_transaction_amount, max_wallet_size, self.total_supply)?;
            self.env().emit_event(LimitsUpdated {
                previous_max_transaction_amount: previous.max_transaction_amount,
                previous_max_wallet_size: previous.max_wallet_size,
                max_transaction_amount,
                max_wallet_size,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn set_blacklist(&mut self, account: AccountId, blacklisted: bool) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            self.blacklisted.insert(account, &blacklisted);
            self.env().emit_event(BlacklistUpdated {
                account,
                blacklisted,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn set_fee_exclusion(&mut self, account: AccountId, excluded: bool) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            self.excluded_from_fee.insert(account, &excluded);
            Ok(())
        }

        /// Halt every balance change, mint and burn included.
        ///
        /// # Errors
        /// - [`Error::Unauthorized`] — caller lacks [`Role::Admin`].
        /// - [`Error::Paused`]       — already paused.
        #[ink(message)]
        pub fn pause(&mut self) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            if self.paused {
                return Err(Error::Paused);
            }
            self.paused = true;
            self.env().emit_event(Paused {
                account: self.env().caller(),
            });
            Ok(())
        }

        /// # Errors
        /// - [`Error::Unauthorized`] — caller lacks [`Role::Admin`].
        /// - [`Error::NotPaused`]    — not paused.
        #[ink(message)]
        pub fn unpause(&mut self) -> Result<()> {
            self.ensure_role(Role::Admin)?;
            if !self.paused {
                return Err(Error::NotPaused);
            }
            self.paused = false;
            self.env().emit_event(Unpaused {
                account: self.env().caller(),
            });
            Ok(())
        }

        // =====================================================================
        // ACCESS CONTROL
        // =====================================================================

        #[ink(message)]
        pub fn has_role(&self, role: Role, account: AccountId) -> bool {
            self.roles.get((role, account)).unwrap_or(false)
        }

        /// Requires the admin role of `role` (always [`Role::DefaultAdmin`]).
        #[ink(message)]
        pub fn grant_role(&mut self, role: Role, account: AccountId) -> Result<()> {
            self.ensure_role(role.admin_role())?;
            let sender = self.env().caller();
            self.grant_role_internal(role, account, sender);
            Ok(())
        }

        #[ink(message)]
        pub fn revoke_role(&mut self, role: Role, account: AccountId) -> Result<()> {
            self.ensure_role(role.admin_role())?;
            let sender = self.env().caller();
            self.revoke_role_internal(role, account, sender);
            Ok(())
        }

        /// Drop one of the caller's own roles.
        #[ink(message)]
        pub fn renounce_role(&mut self, role: Role) -> Result<()> {
            let caller = self.env().caller();
            self.revoke_role_internal(role, caller, caller);
            Ok(())
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn transfer_impl(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<()> {
            Self::ensure_not_zero(to)?;
            self.update(Some(from), Some(to), value)
        }

        /// The single balance-change path: decide, stage, then commit.
        fn update(
            &mut self,
            from: Option<AccountId>,
            to: Option<AccountId>,
            amount: Balance,
        ) -> Result<()> {
            let decision = policy::decide(&*self, from, to, amount)?;
            let staged = ledger::stage(decision.movements(), self.total_supply, |account| {
                self.balances.get(account).unwrap_or(0)
            })?;

            // ── Commit ────────────────────────────────────────────────────
            for (account, balance) in staged.balances {
                self.balances.insert(account, &balance);
            }
            self.total_supply = staged.total_supply;

            for movement in decision.movements() {
                self.env().emit_event(Transfer {
                    from: movement.from,
                    to: movement.to,
                    value: movement.amount,
                });
            }
            Ok(())
        }

        /// Run `f` with the reentrancy lock held. The lock is released on
        /// both `Ok` and `Err`.
        fn non_reentrant<T, F>(&mut self, f: F) -> Result<T>
        where
            F: FnOnce(&mut Self) -> Result<T>,
        {
            if self.entered {
                return Err(Error::ReentrantCall);
            }
            self.entered = true;
            let result = f(self);
            self.entered = false;
            result
        }

        fn grant_role_internal(&mut self, role: Role, account: AccountId, sender: AccountId) {
            if self.has_role(role, account) {
                return;
            }
            self.roles.insert((role, account), &true);
            self.env().emit_event(RoleGranted {
                role,
                account,
                sender,
            });
        }

        fn revoke_role_internal(&mut self, role: Role, account: AccountId, sender: AccountId) {
            if !self.has_role(role, account) {
                return;
            }
            self.roles.remove((role, account));
            self.env().emit_event(RoleRevoked {
                role,
                account,
                sender,
            });
        }

        fn ensure_role(&self, role: Role) -> Result<()> {
            if !self.has_role(role, self.env().caller()) {
                return Err(Error::Unauthorized);
            }
            Ok(())
        }

        fn ensure_not_zero(account: AccountId) -> Result<()> {
            if account == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            Ok(())
        }
    }

    impl PolicyContext for FeeToken {
        fn is_paused(&self) -> bool {
            self.paused
        }

        fn is_blacklisted(&self, account: &AccountId) -> bool {
            self.blacklisted.get(account).unwrap_or(false)
        }

        fn is_fee_exempt(&self, account: &AccountId) -> bool {
            self.excluded_from_fee.get(account).unwrap_or(false)
        }

        fn balance(&self, account: &AccountId) -> Balance {
            self.balances.get(account).unwrap_or(0)
        }

        fn fee_config(&self) -> FeeConfig {
            self.fees
        }

        fn limits(&self) -> LimitConfig {
            self.limits
        }

        fn contract_address(&self) -> AccountId {
            ink::env::account_id::<ink::env::DefaultEnvironment>()
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================
    //
    // Fixture: alice deploys (exempt, both roles), eve is the marketing
    // wallet (exempt), bob / charlie / django are ordinary holders.

}
