//! Checking and savings balance tracking.

use qpbank_common::AccountKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Both sub-balances of a ledger at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balances {
    /// Checking balance.
    pub checking: Decimal,
    /// Savings balance.
    pub savings: Decimal,
}

impl Balances {
    /// Create a new zero balance.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Balance of one account.
    pub fn get(&self, account: AccountKind) -> Decimal {
        match account {
            AccountKind::Checking => self.checking,
            AccountKind::Savings => self.savings,
        }
    }

    pub(crate) fn get_mut(&mut self, account: AccountKind) -> &mut Decimal {
        match account {
            AccountKind::Checking => &mut self.checking,
            AccountKind::Savings => &mut self.savings,
        }
    }

    /// Sum of both accounts, or `None` past the decimal range.
    pub fn total(&self) -> Option<Decimal> {
        self.checking.checked_add(self.savings)
    }

    /// Check if an account can cover `amount`. Equality is sufficient.
    pub fn has_sufficient_funds(&self, account: AccountKind, amount: Decimal) -> bool {
        self.get(account) >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_operations() {
        let mut balances = Balances::zero();
        *balances.get_mut(AccountKind::Checking) = Decimal::from(10000);
        *balances.get_mut(AccountKind::Savings) = Decimal::from(2000);

        assert_eq!(balances.total(), Some(Decimal::from(12000)));
        assert_eq!(balances.get(AccountKind::Checking), Decimal::from(10000));
        assert!(balances.has_sufficient_funds(AccountKind::Savings, Decimal::from(2000)));
        assert!(!balances.has_sufficient_funds(AccountKind::Savings, Decimal::from(2001)));
    }

    #[test]
    fn test_total_out_of_range() {
        let balances = Balances {
            checking: Decimal::MAX,
            savings: Decimal::ONE,
        };
        assert_eq!(balances.total(), None);
    }
}
