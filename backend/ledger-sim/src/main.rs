//! `ledger-sim` — drive the fund_ledger contract in a local sandbox.
//!
//! The contract, a Stellar Asset Contract for the base currency, and the mock
//! price feed all run natively inside an in-process Soroban host, so flows can
//! be exercised without a network.

mod config;
mod error;
mod sandbox;
mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::SimConfig,
    sandbox::{Sandbox, OWNER},
    scenario::Scenario,
};

#[derive(Parser, Debug)]
#[command(name = "ledger-sim", version, about = "Replay fund/withdraw flows against fund_ledger")]
struct Cli {
    /// JSON file overriding the default sandbox configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario file.
    Run {
        scenario: PathBuf,
        /// Exit with an error if any step failed.
        #[arg(long)]
        strict: bool,
    },
    /// Fund from several accounts, then withdraw as the owner.
    Demo {
        #[arg(long, default_value_t = 6)]
        funders: usize,
        /// Base units contributed by each funder.
        #[arg(long, default_value_t = 10_000_000)]
        amount: i64,
        /// Use the cached-reset withdrawal.
        #[arg(long)]
        optimized: bool,
    },
    /// Convert a base-currency amount to its reference value.
    Quote {
        #[arg(long)]
        amount: i64,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = SimConfig::load(cli.config.as_deref()).context("loading sandbox config")?;

    match cli.command {
        Command::Run { scenario, strict } => {
            let scenario = Scenario::from_file(&scenario).context("loading scenario")?;
            let sandbox = Sandbox::deploy(&config, scenario.funders);
            let report = scenario.replay(&sandbox);

            info!(
                succeeded = report.succeeded,
                failed = report.failed,
                withdrawn = report.withdrawn,
                "scenario finished"
            );
            println!("{}", report.last);

            if strict && report.failed > 0 {
                bail!("{} step(s) failed", report.failed);
            }
        }
        Command::Demo {
            funders,
            amount,
            optimized,
        } => {
            let sandbox = Sandbox::deploy(&config, funders);
            for account in 1..=funders {
                sandbox
                    .fund(account, amount)
                    .with_context(|| format!("funding from account #{account}"))?;
            }
            info!(before = %sandbox.snapshot(), "funded");

            let withdrawn = sandbox
                .withdraw(OWNER, optimized)
                .context("owner withdrawal")?;
            info!(withdrawn, optimized, "withdraw done");
            println!("{}", sandbox.snapshot());
        }
        Command::Quote { amount } => {
            let sandbox = Sandbox::deploy(&config, 0);
            let value = sandbox.quote(amount).context("quoting amount")?;
            println!("{value}");
        }
    }

    Ok(())
}
