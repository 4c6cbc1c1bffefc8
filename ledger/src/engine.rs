//! Core ledger engine implementation.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use qpbank_common::{
    is_positive, AccountKind, BankError, Clock, Dollars, RecordId, Result, SystemClock,
    TransferRoute,
};

use crate::account::AccountHolder;
use crate::balance::Balances;
use crate::journal::{Journal, TransactionKind, TransactionRecord};

/// Outcome of a successful deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Deposit or withdrawal.
    pub kind: TransactionKind,
    /// Account that changed.
    pub account: AccountKind,
    /// Amount applied.
    pub amount: Decimal,
    /// New balance of `account`.
    pub balance: Decimal,
    /// Journal entry written for this operation.
    pub record_id: RecordId,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} successful. New {} Balance: {}",
            self.kind,
            self.account.title(),
            Dollars(self.balance)
        )
    }
}

/// Outcome of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Direction of the move.
    pub route: TransferRoute,
    /// Amount moved.
    pub amount: Decimal,
    /// Source balance after the move.
    pub from_balance: Decimal,
    /// Destination balance after the move.
    pub to_balance: Decimal,
    /// Journal entry written for this operation.
    pub record_id: RecordId,
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer successful. {} Balance: {}, {} Balance: {}",
            self.route.from().title(),
            Dollars(self.from_balance),
            self.route.to().title(),
            Dollars(self.to_balance)
        )
    }
}

/// One holder's checking and savings balances and their journal.
///
/// Every mutation is checked in full before anything is written, so a
/// rejected call leaves balances and journal exactly as they were.
#[derive(Debug)]
pub struct Ledger {
    holder: AccountHolder,
    balances: Balances,
    journal: Journal,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a new ledger on the system clock.
    pub fn new(name: impl Into<String>, pin: impl Into<String>) -> Self {
        Self::with_clock(name, pin, Arc::new(SystemClock))
    }

    /// Create a new ledger that reads time from `clock`.
    pub fn with_clock(
        name: impl Into<String>,
        pin: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let holder = AccountHolder::new(name, pin, clock.now());
        Self {
            holder,
            balances: Balances::zero(),
            journal: Journal::new(),
            clock,
        }
    }

    /// Add `amount` to one account.
    #[instrument(skip(self))]
    pub fn deposit(&mut self, amount: Decimal, account: AccountKind) -> Result<Receipt> {
        Self::check_amount(TransactionKind::Deposit, amount)?;
        let balance = Self::credit(self.balances.get(account), account, amount)?;

        *self.balances.get_mut(account) = balance;

        let record_id = self.record(TransactionKind::Deposit, amount, account.label());

        info!(balance = %balance, "Deposit recorded");

        Ok(Receipt {
            kind: TransactionKind::Deposit,
            account,
            amount,
            balance,
            record_id,
        })
    }

    /// Take `amount` out of one account.
    #[instrument(skip(self))]
    pub fn withdraw(&mut self, amount: Decimal, account: AccountKind) -> Result<Receipt> {
        Self::check_amount(TransactionKind::Withdrawal, amount)?;
        self.check_funds(account, amount)?;

        let balance = self.balances.get_mut(account);
        *balance -= amount;
        let balance = *balance;

        let record_id = self.record(TransactionKind::Withdrawal, amount, account.label());

        info!(balance = %balance, "Withdrawal recorded");

        Ok(Receipt {
            kind: TransactionKind::Withdrawal,
            account,
            amount,
            balance,
            record_id,
        })
    }

    /// Move `amount` from one account to the other.
    #[instrument(skip(self))]
    pub fn transfer(
        &mut self,
        amount: Decimal,
        from: AccountKind,
        to: AccountKind,
    ) -> Result<TransferReceipt> {
        Self::check_amount(TransactionKind::Transfer, amount)?;
        let route = TransferRoute::new(from, to).map_err(|e| {
            debug!(code = e.error_code(), "Transfer rejected");
            e
        })?;
        self.transfer_along(amount, route)
    }

    /// Move `amount` along an already validated route.
    pub fn transfer_along(&mut self, amount: Decimal, route: TransferRoute) -> Result<TransferReceipt> {
        Self::check_amount(TransactionKind::Transfer, amount)?;
        self.check_funds(route.from(), amount)?;
        let credited = Self::credit(self.balances.get(route.to()), route.to(), amount)?;

        // Both legs are applied to a copy and swapped in together.
        let mut next = self.balances;
        *next.get_mut(route.from()) -= amount;
        *next.get_mut(route.to()) = credited;
        self.balances = next;

        let record_id = self.record(TransactionKind::Transfer, amount, route.description());

        info!(
            route = %route,
            from_balance = %next.get(route.from()),
            to_balance = %next.get(route.to()),
            "Transfer recorded"
        );

        Ok(TransferReceipt {
            route,
            amount,
            from_balance: next.get(route.from()),
            to_balance: next.get(route.to()),
            record_id,
        })
    }

    /// Balance of one account.
    pub fn balance(&self, account: AccountKind) -> Decimal {
        self.balances.get(account)
    }

    /// Balance of the account named by a selector string.
    pub fn balance_of(&self, selector: &str) -> Result<Decimal> {
        let account: AccountKind = selector.parse()?;
        Ok(self.balance(account))
    }

    /// Both balances.
    pub fn balances(&self) -> Balances {
        self.balances
    }

    /// Full history, oldest first.
    pub fn history(&self) -> &[TransactionRecord] {
        self.journal.records()
    }

    /// Account holder.
    pub fn holder(&self) -> &AccountHolder {
        &self.holder
    }

    /// Reject a zero or negative `amount` for `kind`.
    pub fn check_amount(kind: TransactionKind, amount: Decimal) -> Result<()> {
        if !is_positive(amount) {
            debug!(kind = %kind, amount = %amount, "Rejected non-positive amount");
            return Err(BankError::InvalidAmount {
                operation: kind.as_str(),
            });
        }
        Ok(())
    }

    fn credit(balance: Decimal, account: AccountKind, amount: Decimal) -> Result<Decimal> {
        balance.checked_add(amount).ok_or_else(|| {
            debug!(account = %account, amount = %amount, "Rejected amount past balance range");
            BankError::AmountTooLarge { account }
        })
    }

    fn check_funds(&self, account: AccountKind, amount: Decimal) -> Result<()> {
        if !self.balances.has_sufficient_funds(account, amount) {
            let available = self.balances.get(account);
            debug!(
                account = %account,
                requested = %amount,
                available = %available,
                "Rejected for insufficient funds"
            );
            return Err(BankError::InsufficientFunds {
                account,
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        description: impl Into<String>,
    ) -> RecordId {
        let now = self.clock.now();
        self.journal.append(kind, amount, description, now).id
    }
}
