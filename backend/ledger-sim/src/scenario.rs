//! Scripted fund/withdraw flows.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "funders": 2,
//!   "steps": [
//!     { "action": "fund", "account": 1, "amount": 10000000 },
//!     { "action": "withdraw", "account": 0, "optimized": true },
//!     { "action": "status" }
//!   ]
//! }
//! ```
//!
//! Account 0 is the owner. A failing step is logged and counted; replay
//! continues with the next step.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::SimError,
    sandbox::{Sandbox, Snapshot},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub funders: usize,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Fund {
        account: usize,
        amount: i64,
    },
    Withdraw {
        account: usize,
        #[serde(default)]
        optimized: bool,
    },
    SetPrice {
        answer: i64,
    },
    Advance {
        seconds: u64,
    },
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub succeeded: usize,
    pub failed: usize,
    pub withdrawn: i128,
    pub last: Snapshot,
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SimError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn replay(&self, sandbox: &Sandbox) -> Report {
        let mut succeeded = 0;
        let mut failed = 0;
        let mut withdrawn = 0i128;

        for (index, step) in self.steps.iter().enumerate() {
            match apply(sandbox, step) {
                Ok(Some(amount)) => {
                    succeeded += 1;
                    withdrawn += amount;
                }
                Ok(None) => succeeded += 1,
                Err(err) => {
                    failed += 1;
                    warn!(index, ?step, %err, "step failed");
                }
            }
        }

        Report {
            succeeded,
            failed,
            withdrawn,
            last: sandbox.snapshot(),
        }
    }
}

/// Run one step; returns the amount swept for successful withdrawals.
fn apply(sandbox: &Sandbox, step: &Step) -> Result<Option<i128>, SimError> {
    match *step {
        Step::Fund { account, amount } => {
            let total = sandbox.fund(account, amount)?;
            info!(account, amount, total, "fund");
            Ok(None)
        }
        Step::Withdraw { account, optimized } => {
            let amount = sandbox.withdraw(account, optimized)?;
            info!(account, optimized, amount, "withdraw");
            Ok(Some(amount))
        }
        Step::SetPrice { answer } => {
            sandbox.set_price(answer);
            info!(answer, "price updated");
            Ok(None)
        }
        Step::Advance { seconds } => {
            sandbox.advance(seconds)?;
            info!(seconds, "clock advanced");
            Ok(None)
        }
        Step::Status => {
            info!(snapshot = %sandbox.snapshot(), "status");
            Ok(None)
        }
    }
}
