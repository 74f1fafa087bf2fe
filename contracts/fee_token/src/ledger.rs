//! Validate-all-then-commit-all settlement of a policy decision.
//!
//! Every movement is replayed against an in-memory overlay of the balances it
//! touches. Only when the whole batch clears does the caller write anything
//! back, so a failing third sub-transfer can never leave the first two applied.

use ink::prelude::{collections::BTreeMap, vec::Vec};
use ink::primitives::AccountId;

use crate::errors::{Error, Result};
use crate::policy::{Balance, Movement};

/// Post-settlement state for every account the batch touched.
#[derive(Debug, PartialEq, Eq)]
pub struct Staged {
    pub balances: Vec<(AccountId, Balance)>,
    pub total_supply: Balance,
}

/// Simulate `movements` in order, reading untouched balances through
/// `read_balance`.
///
/// A `None` source mints (supply grows); a `None` destination burns (supply
/// shrinks). Debits fail with `InsufficientBalance`, credits with `Overflow`.
pub fn stage<F>(movements: &[Movement], total_supply: Balance, read_balance: F) -> Result<Staged>
where
    F: Fn(&AccountId) -> Balance,
{
    let mut overlay: BTreeMap<AccountId, Balance> = BTreeMap::new();
    let mut supply = total_supply;

    for movement in movements {
        match movement.from {
            Some(from) => {
                let balance = *overlay.entry(from).or_insert_with(|| read_balance(&from));
                let debited = balance
                    .checked_sub(movement.amount)
                    .ok_or(Error::InsufficientBalance)?;
                overlay.insert(from, debited);
            }
            None => {
                supply = supply.checked_add(movement.amount).ok_or(Error::Overflow)?;
            }
        }

        match movement.to {
            Some(to) => {
                let balance = *overlay.entry(to).or_insert_with(|| read_balance(&to));
                let credited = balance.checked_add(movement.amount).ok_or(Error::Overflow)?;
                overlay.insert(to, credited);
            }
            None => {
                supply = supply
                    .checked_sub(movement.amount)
                    .ok_or(Error::InsufficientBalance)?;
            }
        }
    }

    Ok(Staged {
        balances: overlay.into_iter().collect(),
        total_supply: supply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acct(n: u8) -> AccountId {
        AccountId::from([n; 32])
    }

    fn mv(from: Option<u8>, to: Option<u8>, amount: Balance) -> Movement {
        Movement {
            from: from.map(acct),
            to: to.map(acct),
            amount,
        }
    }

    fn book(entries: &[(u8, Balance)]) -> BTreeMap<AccountId, Balance> {
        entries.iter().map(|(n, b)| (acct(*n), *b)).collect()
    }

    fn reader(book: &BTreeMap<AccountId, Balance>) -> impl Fn(&AccountId) -> Balance + '_ {
        move |account| book.get(account).copied().unwrap_or(0)
    }

    fn final_balance(staged: &Staged, n: u8) -> Option<Balance> {
        staged
            .balances
            .iter()
            .find(|(account, _)| *account == acct(n))
            .map(|(_, balance)| *balance)
    }

    #[test]
    fn three_way_split_drains_exact_source_balance() {
        let book = book(&[(1, 1000)]);
        let batch = [mv(Some(1), Some(9), 20), mv(Some(1), Some(8), 30), mv(Some(1), Some(2), 950)];
        let staged = stage(&batch, 5000, reader(&book)).unwrap();
        assert_eq!(final_balance(&staged, 1), Some(0));
        assert_eq!(final_balance(&staged, 9), Some(20));
        assert_eq!(final_balance(&staged, 8), Some(30));
        assert_eq!(final_balance(&staged, 2), Some(950));
        assert_eq!(staged.total_supply, 5000);
    }

    #[test]
    fn shortfall_on_last_leg_rejects_whole_batch() {
        let book = book(&[(1, 999)]);
        let batch = [mv(Some(1), Some(9), 20), mv(Some(1), Some(8), 30), mv(Some(1), Some(2), 950)];
        assert_eq!(stage(&batch, 5000, reader(&book)), Err(Error::InsufficientBalance));
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let book = book(&[(1, 40)]);
        let staged = stage(&[mv(Some(1), Some(1), 40)], 40, reader(&book)).unwrap();
        assert_eq!(staged.balances, [(acct(1), 40)]);
    }

    #[test]
    fn mint_grows_supply_and_burn_shrinks_it() {
        let book = book(&[]);
        let staged = stage(&[mv(None, Some(1), 70)], 0, reader(&book)).unwrap();
        assert_eq!(staged.total_supply, 70);
        assert_eq!(final_balance(&staged, 1), Some(70));

        let book = book_from(&staged);
        let staged = stage(&[mv(Some(1), None, 25)], 70, reader(&book)).unwrap();
        assert_eq!(staged.total_supply, 45);
        assert_eq!(final_balance(&staged, 1), Some(45));
    }

    #[test]
    fn burn_beyond_balance_fails() {
        let book = book(&[(1, 10)]);
        assert_eq!(
            stage(&[mv(Some(1), None, 11)], 10, reader(&book)),
            Err(Error::InsufficientBalance)
        );
    }

    #[test]
    fn credit_overflow_is_reported() {
        let book = book(&[(1, 5), (2, Balance::MAX)]);
        assert_eq!(stage(&[mv(Some(1), Some(2), 1)], 0, reader(&book)), Err(Error::Overflow));
    }

    #[test]
    fn mint_supply_overflow_is_reported() {
        let book = book(&[]);
        assert_eq!(
            stage(&[mv(None, Some(1), 1)], Balance::MAX, reader(&book)),
            Err(Error::Overflow)
        );
    }

    fn book_from(staged: &Staged) -> BTreeMap<AccountId, Balance> {
        staged.balances.iter().copied().collect()
    }
}
