//! Interactive menu loop.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use qpbank_common::{parse_amount, AccountKind, BankError, Dollars, TransferRoute};
use qpbank_ledger::{Ledger, Session, TransactionKind};

use crate::config::{HistoryFormat, TellerConfig};
use crate::render;

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CreateAccount,
    AccountInfo,
    Deposit,
    Withdraw,
    Transfer,
    History,
    Quit,
}

impl MenuOption {
    /// Parse an option number as typed.
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuOption::CreateAccount),
            "2" => Some(MenuOption::AccountInfo),
            "3" => Some(MenuOption::Deposit),
            "4" => Some(MenuOption::Withdraw),
            "5" => Some(MenuOption::Transfer),
            "6" => Some(MenuOption::History),
            "7" => Some(MenuOption::Quit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The teller shell: reads choices from `input`, writes to `output`.
pub struct Teller<R, W> {
    config: TellerConfig,
    session: Session,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Teller<R, W> {
    /// Create a teller over a session.
    pub fn new(config: TellerConfig, session: Session, input: R, output: W) -> Self {
        Self {
            config,
            session,
            input,
            output,
        }
    }

    /// Run until the customer quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        info!(bank = %self.config.bank_name, "Teller started");

        loop {
            render::menu(&mut self.output, &self.config.bank_name)?;

            let Some(choice) = self.ask("Input option number: ")? else {
                self.quit()?;
                break;
            };

            let flow = match MenuOption::parse(&choice) {
                Some(option) => self.handle(option)?,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        info!("Teller stopped");
        Ok(())
    }

    /// Consume the teller, returning the session and output.
    #[cfg(test)]
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.output)
    }

    fn handle(&mut self, option: MenuOption) -> io::Result<Flow> {
        debug!(?option, "Menu option selected");

        match option {
            MenuOption::CreateAccount => return self.create_account(),
            MenuOption::Quit => return self.quit(),
            _ => {}
        }

        if !self.session.is_open() {
            self.report_error(&BankError::NoAccount)?;
            return Ok(Flow::Continue);
        }

        if self.config.require_pin {
            let Some(attempt) = self.ask("Enter your PIN: ")? else {
                return self.quit();
            };
            if let Err(e) = self.session.verify_pin(&attempt) {
                self.report_error(&e)?;
                return Ok(Flow::Continue);
            }
        }

        match option {
            MenuOption::AccountInfo => self.account_info(),
            MenuOption::Deposit => self.deposit(),
            MenuOption::Withdraw => self.withdraw(),
            MenuOption::Transfer => self.transfer(),
            MenuOption::History => self.history().map(|_| Flow::Continue),
            MenuOption::CreateAccount | MenuOption::Quit => Ok(Flow::Continue),
        }
    }

    fn create_account(&mut self) -> io::Result<Flow> {
        let Some(name) = self.ask("Enter your full name (First Last): ")? else {
            return self.quit();
        };
        let Some(pin) = self.ask("Create a 4-digit PIN: ")? else {
            return self.quit();
        };

        let summary = self.session.open(name.to_lowercase(), pin);
        debug!(
            holder = %summary.display_name,
            replaced = summary.replaced_previous,
            "Account created at teller"
        );
        writeln!(self.output, "Account created successfully!")?;
        Ok(Flow::Continue)
    }

    fn account_info(&mut self) -> io::Result<Flow> {
        let info = self
            .session
            .with_ledger(|l| (l.holder().display_name(), l.balances()));

        match info {
            Ok((name, balances)) => {
                writeln!(self.output, "Account Holder: {}", name)?;
                writeln!(self.output, "Checking Balance: {}", Dollars(balances.checking))?;
                writeln!(self.output, "Savings Balance: {}", Dollars(balances.savings))?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn deposit(&mut self) -> io::Result<Flow> {
        let Some(selector) = self.ask("Deposit to (checking/savings): ")? else {
            return self.quit();
        };
        let Some(amount) = self.ask("Enter deposit amount: $")? else {
            return self.quit();
        };

        let outcome = parse_amount(&amount).and_then(|amount| {
            Ledger::check_amount(TransactionKind::Deposit, amount)?;
            let account: AccountKind = selector.parse()?;
            self.session
                .with_ledger_mut(|l| l.deposit(amount, account))
                .map(|receipt| receipt.to_string())
        });
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> io::Result<Flow> {
        let Some(selector) = self.ask("Withdraw from (checking/savings): ")? else {
            return self.quit();
        };
        let Some(amount) = self.ask("Enter withdrawal amount: $")? else {
            return self.quit();
        };

        let outcome = parse_amount(&amount).and_then(|amount| {
            Ledger::check_amount(TransactionKind::Withdrawal, amount)?;
            let account: AccountKind = selector.parse()?;
            self.session
                .with_ledger_mut(|l| l.withdraw(amount, account))
                .map(|receipt| receipt.to_string())
        });
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn transfer(&mut self) -> io::Result<Flow> {
        let Some(from) = self.ask("Transfer from (checking/savings): ")? else {
            return self.quit();
        };
        let Some(to) = self.ask("Transfer to (checking/savings): ")? else {
            return self.quit();
        };
        let Some(amount) = self.ask("Enter transfer amount: $")? else {
            return self.quit();
        };

        let outcome = parse_amount(&amount).and_then(|amount| {
            Ledger::check_amount(TransactionKind::Transfer, amount)?;
            let route = TransferRoute::parse(&from, &to)?;
            self.session
                .with_ledger_mut(|l| l.transfer_along(amount, route))
                .map(|receipt| receipt.to_string())
        });
        self.report(outcome)?;
        Ok(Flow::Continue)
    }

    fn history(&mut self) -> io::Result<()> {
        let snapshot = self
            .session
            .with_ledger(|l| (l.holder().display_name(), l.history().to_vec()));

        match snapshot {
            Ok((name, records)) => match self.config.history_format {
                HistoryFormat::Table => render::history_table(&mut self.output, &name, &records),
                HistoryFormat::Json => render::history_json(&mut self.output, &records),
            },
            Err(e) => self.report_error(&e),
        }
    }

    fn quit(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Quitting system. Thank you for banking with us!")?;
        if self.session.is_open() {
            writeln!(self.output, "Transaction History:")?;
            self.history()?;
        }
        Ok(Flow::Quit)
    }

    /// Prompt and read one line. `None` means input is exhausted.
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, outcome: Result<String, BankError>) -> io::Result<()> {
        match outcome {
            Ok(message) => writeln!(self.output, "{}", message),
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, error: &BankError) -> io::Result<()> {
        debug!(code = error.error_code(), error = %error, "Request not completed");
        writeln!(self.output, "{}", error)
    }
}
