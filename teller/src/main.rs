//! QP Bank Teller
//!
//! Interactive menu for a single checking/savings account.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qpbank_ledger::Session;

mod config;
mod render;
mod teller;

use config::{HistoryFormat, LogFormat, TellerConfig};
use teller::Teller;

/// QP Bank teller CLI
#[derive(Parser, Debug)]
#[command(name = "qpbank")]
#[command(about = "Interactive checking and savings account demo")]
struct Args {
    /// Bank name shown in the menu title
    #[arg(long)]
    bank_name: Option<String>,

    /// Ask for the account PIN before account operations
    #[arg(long)]
    require_pin: bool,

    /// How to print the transaction history
    #[arg(long, value_enum)]
    history_format: Option<HistoryFormat>,

    /// Log line format on stderr
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    /// Overlay command-line flags on top of the environment configuration.
    fn apply(self, mut config: TellerConfig) -> TellerConfig {
        if let Some(name) = self.bank_name {
            config.bank_name = name;
        }
        if self.require_pin {
            config.require_pin = true;
        }
        if let Some(format) = self.history_format {
            config.history_format = format;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config
    }
}

fn init_logging(config: &TellerConfig) {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Args::parse().apply(TellerConfig::from_env());

    init_logging(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    info!(
        bank = %config.bank_name,
        require_pin = config.require_pin,
        "Starting QP Bank teller"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut teller = Teller::new(config, Session::new(), stdin.lock(), stdout.lock());
    teller.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_environment() {
        let args = Args::parse_from([
            "qpbank",
            "--bank-name",
            "Harbor Bank",
            "--require-pin",
            "--history-format",
            "json",
        ]);
        let config = args.apply(TellerConfig::default());

        assert_eq!(config.bank_name, "Harbor Bank");
        assert!(config.require_pin);
        assert_eq!(config.history_format, HistoryFormat::Json);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_absent_args_keep_environment() {
        let env = TellerConfig {
            bank_name: "Eastern Bank".to_string(),
            require_pin: true,
            ..TellerConfig::default()
        };
        let config = Args::parse_from(["qpbank"]).apply(env);

        assert_eq!(config.bank_name, "Eastern Bank");
        assert!(config.require_pin);
    }
}
