//! Error types for QP Bank operations.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::AccountKind;

/// Main error type for QP Bank operations.
///
/// Display text is what the teller prints back to the customer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Amount was zero or negative.
    #[error("{operation} amount must be positive.")]
    InvalidAmount { operation: &'static str },

    /// Applying the amount would overflow the account balance.
    #[error("Amount too large for {}.", .account.label())]
    AmountTooLarge { account: AccountKind },

    /// Selector did not name a known account.
    #[error("Invalid account type. Choose 'checking' or 'savings'.")]
    InvalidAccountSelector(String),

    /// Transfer endpoints were unknown or named the same account.
    #[error("Invalid account types. Choose 'checking' or 'savings' for both accounts.")]
    InvalidAccountPair { from: String, to: String },

    /// Source balance is smaller than the requested amount.
    #[error("Insufficient funds in {}.", .account.label())]
    InsufficientFunds {
        account: AccountKind,
        requested: Decimal,
        available: Decimal,
    },

    /// No account has been created in this session.
    #[error("No account exists. Please create an account first.")]
    NoAccount,

    /// PIN entered at the teller did not match the stored one.
    #[error("Incorrect PIN.")]
    IncorrectPin,

    /// Input could not be interpreted (e.g. an unparseable amount).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl BankError {
    /// Build an input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        BankError::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this error is a ledger rejection (the ledger was consulted
    /// and left unchanged).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BankError::InvalidAmount { .. }
                | BankError::AmountTooLarge { .. }
                | BankError::InvalidAccountSelector(_)
                | BankError::InvalidAccountPair { .. }
                | BankError::InsufficientFunds { .. }
        )
    }

    /// Get error code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            BankError::InvalidAmount { .. } => "INVALID_AMOUNT",
            BankError::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            BankError::InvalidAccountSelector(_) => "INVALID_ACCOUNT_SELECTOR",
            BankError::InvalidAccountPair { .. } => "INVALID_ACCOUNT_PAIR",
            BankError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            BankError::NoAccount => "NO_ACCOUNT",
            BankError::IncorrectPin => "INCORRECT_PIN",
            BankError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

/// Result type alias for QP Bank operations.
pub type Result<T> = std::result::Result<T, BankError>;
