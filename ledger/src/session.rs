//! Process-wide holder for the single open ledger.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use qpbank_common::{BankError, Clock, Result, SystemClock};

use crate::engine::Ledger;

/// Summary returned when an account is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    /// Holder name as displayed.
    pub display_name: String,
    /// Whether an earlier account was discarded.
    pub replaced_previous: bool,
}

/// Holds at most one [`Ledger`].
///
/// Opening an account discards any previous ledger wholesale. All access
/// goes through the mutex, so a check-then-mutate sequence inside a closure
/// cannot interleave with another caller.
#[derive(Debug)]
pub struct Session {
    current: Mutex<Option<Ledger>>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Create an empty session on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty session whose ledgers read time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            current: Mutex::new(None),
            clock,
        }
    }

    /// Open a new account, replacing the current one if any.
    pub fn open(&self, name: impl Into<String>, pin: impl Into<String>) -> AccountSummary {
        let ledger = Ledger::with_clock(name, pin, self.clock.clone());
        let summary = AccountSummary {
            display_name: ledger.holder().display_name(),
            replaced_previous: false,
        };

        let previous = self.current.lock().replace(ledger);
        let replaced_previous = previous.is_some();
        if let Some(old) = previous {
            warn!(
                holder = %old.holder().display_name(),
                records = old.history().len(),
                "Replacing existing account"
            );
        }

        info!(holder = %summary.display_name, "Account opened");

        AccountSummary {
            replaced_previous,
            ..summary
        }
    }

    /// Check if an account exists.
    pub fn is_open(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Run a read against the current ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> Result<R> {
        let guard = self.current.lock();
        let ledger = guard.as_ref().ok_or(BankError::NoAccount)?;
        Ok(f(ledger))
    }

    /// Run a mutation against the current ledger.
    pub fn with_ledger_mut<R>(&self, f: impl FnOnce(&mut Ledger) -> Result<R>) -> Result<R> {
        let mut guard = self.current.lock();
        let ledger = guard.as_mut().ok_or(BankError::NoAccount)?;
        f(ledger)
    }

    /// Compare a PIN attempt against the current holder's PIN.
    pub fn verify_pin(&self, attempt: &str) -> Result<()> {
        let matches = self.with_ledger(|ledger| ledger.holder().pin.matches(attempt))?;
        if matches {
            Ok(())
        } else {
            warn!("PIN check failed");
            Err(BankError::IncorrectPin)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpbank_common::AccountKind;
    use rust_decimal::Decimal;

    #[test]
    fn test_operations_require_account() {
        let session = Session::new();
        assert!(!session.is_open());

        let err = session
            .with_ledger_mut(|l| l.deposit(Decimal::from(10), AccountKind::Checking))
            .unwrap_err();
        assert_eq!(err, BankError::NoAccount);

        let err = session.with_ledger(|l| l.history().len()).unwrap_err();
        assert_eq!(err, BankError::NoAccount);
        assert_eq!(session.verify_pin("1234"), Err(BankError::NoAccount));
    }

    #[test]
    fn test_open_replaces_wholesale() {
        let session = Session::new();
        let first = session.open("jane doe", "1234");
        assert_eq!(first.display_name, "Jane doe");
        assert!(!first.replaced_previous);

        session
            .with_ledger_mut(|l| l.deposit(Decimal::from(500), AccountKind::Savings))
            .unwrap();

        let second = session.open("john roe", "9999");
        assert!(second.replaced_previous);

        let (name, total, records) = session
            .with_ledger(|l| (l.holder().display_name(), l.balances().total(), l.history().len()))
            .unwrap();
        assert_eq!(name, "John roe");
        assert_eq!(total, Some(Decimal::ZERO));
        assert_eq!(records, 0);
    }

    #[test]
    fn test_verify_pin() {
        let session = Session::new();
        session.open("jane doe", "1234");

        assert!(session.verify_pin("1234").is_ok());
        assert_eq!(session.verify_pin("4321"), Err(BankError::IncorrectPin));
    }

    #[test]
    fn test_rejected_mutation_propagates() {
        let session = Session::new();
        session.open("jane doe", "1234");

        let err = session
            .with_ledger_mut(|l| l.withdraw(Decimal::ONE, AccountKind::Checking))
            .unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(session.with_ledger(|l| l.history().len()).unwrap(), 0);
    }

    #[test]
    fn test_shared_session_serializes_transfers() {
        let session = Arc::new(Session::new());
        session.open("jane doe", "1234");
        session
            .with_ledger_mut(|l| l.deposit(Decimal::from(100), AccountKind::Checking))
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = session.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let _ = session.with_ledger_mut(|l| {
                            l.transfer(Decimal::ONE, AccountKind::Checking, AccountKind::Savings)
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let balances = session.with_ledger(|l| l.balances()).unwrap();
        assert_eq!(balances.checking, Decimal::ZERO);
        assert_eq!(balances.savings, Decimal::from(100));
        assert_eq!(session.with_ledger(|l| l.history().len()).unwrap(), 101);
    }
}
