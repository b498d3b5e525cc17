//! In-process deployment of the ledger, a base-currency token and the mock
//! price feed, driven through the generated contract clients.

use std::fmt::{self, Debug};

use fund_ledger::{FundLedger, FundLedgerClient, LedgerStatus};
use mock_price_feed::{MockPriceFeed, MockPriceFeedClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};
use tracing::{debug, info};

use crate::{config::SimConfig, error::SimError};

/// Account 0 is the owner; accounts `1..=funders` are funders.
pub const OWNER: usize = 0;

pub struct Sandbox {
    env: Env,
    ledger: FundLedgerClient<'static>,
    feed: MockPriceFeedClient<'static>,
    token: token::Client<'static>,
    accounts: Vec<Address>,
}

/// Point-in-time view of the deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub balance: i128,
    pub epoch: u32,
    pub status: LedgerStatus,
    /// Contribution per account index, in list order.
    pub contributions: Vec<(usize, i128)>,
    pub owner_balance: i128,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "epoch={} status={:?} balance={} owner_balance={} contributors={}",
            self.epoch,
            self.status,
            self.balance,
            self.owner_balance,
            self.contributions.len()
        )
    }
}

impl Sandbox {
    pub fn deploy(config: &SimConfig, funders: usize) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(config.start_time);

        let issuer = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(issuer);
        let token = token::Client::new(&env, &sac.address());
        let token_admin = token::StellarAssetClient::new(&env, &sac.address());

        let feed_id = env.register(
            MockPriceFeed,
            (config.feed_decimals, i128::from(config.initial_answer)),
        );
        let feed = MockPriceFeedClient::new(&env, &feed_id);

        let accounts: Vec<Address> = (0..=funders).map(|_| Address::generate(&env)).collect();
        for funder in &accounts[1..] {
            token_admin.mint(funder, &i128::from(config.funder_mint));
        }

        let ledger_id = env.register(
            FundLedger,
            (
                accounts[OWNER].clone(),
                sac.address(),
                feed_id,
                config.minimum_reference_value(),
                config.max_price_age,
            ),
        );
        let ledger = FundLedgerClient::new(&env, &ledger_id);

        info!(
            funders,
            minimum = config.minimum_reference_units,
            price = config.initial_answer,
            "sandbox deployed"
        );

        Sandbox {
            env,
            ledger,
            feed,
            token,
            accounts,
        }
    }

    pub fn account(&self, index: usize) -> Result<&Address, SimError> {
        self.accounts
            .get(index)
            .ok_or(SimError::UnknownAccount(index))
    }

    pub fn fund(&self, account: usize, amount: i64) -> Result<i128, SimError> {
        let funder = self.account(account)?;
        let total = settle(self.ledger.try_fund(funder, &i128::from(amount)))?;
        debug!(account, amount, total, "funded");
        Ok(total)
    }

    pub fn withdraw(&self, account: usize, optimized: bool) -> Result<i128, SimError> {
        let caller = self.account(account)?;
        let withdrawn = if optimized {
            settle(self.ledger.try_withdraw_optimized(caller))?
        } else {
            settle(self.ledger.try_withdraw(caller))?
        };
        debug!(account, optimized, withdrawn, "withdrawn");
        Ok(withdrawn)
    }

    pub fn quote(&self, amount: i64) -> Result<i128, SimError> {
        settle(self.ledger.try_to_reference_value(&i128::from(amount)))
    }

    pub fn set_price(&self, answer: i64) {
        self.feed.update_answer(&i128::from(answer));
    }

    /// Move the ledger clock forward without refreshing the feed.
    pub fn advance(&self, seconds: u64) -> Result<(), SimError> {
        let now = self.env.ledger().timestamp();
        let later = now
            .checked_add(seconds)
            .ok_or_else(|| SimError::InvalidStep(format!("clock overflow: {now} + {seconds}s")))?;
        self.env.ledger().set_timestamp(later);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let contributions = self
            .ledger
            .get_contributors()
            .iter()
            .map(|contributor| {
                let index = self
                    .accounts
                    .iter()
                    .position(|account| *account == contributor)
                    .unwrap_or(usize::MAX);
                (index, self.ledger.get_contribution(&contributor))
            })
            .collect();

        Snapshot {
            balance: self.ledger.get_balance(),
            epoch: self.ledger.get_epoch(),
            status: self.ledger.get_status(),
            contributions,
            owner_balance: self.token.balance(&self.accounts[OWNER]),
        }
    }
}

/// Flatten the nested result of a `try_` client call.
fn settle<T, C: Debug, I: Debug>(
    result: Result<Result<T, C>, Result<fund_ledger::Error, I>>,
) -> Result<T, SimError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(conversion)) => Err(SimError::Host(format!("{conversion:?}"))),
        Err(Ok(error)) => Err(SimError::Ledger(error)),
        Err(Err(invoke)) => Err(SimError::Host(format!("{invoke:?}"))),
    }
}
