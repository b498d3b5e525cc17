#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

mod access;
mod events;
mod ledger;
mod oracle;
mod storage;
mod types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_access;

pub use events::{Funded, Withdrawn};
pub use oracle::{PriceData, PriceFeed, PriceFeedClient};
pub use types::{
    Config, LedgerStatus, ResetStrategy, DEFAULT_MAX_PRICE_AGE, DEFAULT_MINIMUM_REFERENCE_VALUE,
    REFERENCE_DECIMALS,
};

use access::require_owner;
use storage::{get_contributor_count, get_epoch, increment_epoch, load_config, save_config};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    BelowMinimumContribution = 1,
    Unauthorized = 2,
    OracleUnavailable = 3,
    StalePrice = 4,
    InvalidPrice = 5,
    TransferFailed = 6,
    InvalidAmount = 7,
    ContributorNotFound = 8,
    ArithmeticOverflow = 9,
    InvalidConfig = 10,
}

#[contract]
pub struct FundLedger;

#[contractimpl]
impl FundLedger {
    /// Create an empty ledger.
    ///
    /// - `owner` is the only address that can ever withdraw; it cannot be changed.
    /// - `token` is the base-currency token contributions are made in.
    /// - `price_feed` quotes one whole `token` in the reference currency.
    /// - `minimum_reference_value` is the contribution floor with `REFERENCE_DECIMALS`
    ///   decimals (must be >= 0).
    /// - `max_price_age` is the oldest acceptable quote, in seconds (must be > 0).
    pub fn __constructor(
        env: Env,
        owner: Address,
        token: Address,
        price_feed: Address,
        minimum_reference_value: i128,
        max_price_age: u64,
    ) {
        if minimum_reference_value < 0 || max_price_age == 0 {
            panic_with_error!(&env, Error::InvalidConfig);
        }

        let base_decimals = token::Client::new(&env, &token).decimals();

        save_config(
            &env,
            &Config {
                owner,
                token,
                price_feed,
                minimum_reference_value,
                max_price_age,
                base_decimals,
            },
        );
    }

    /// Contribute `amount` base units.
    ///
    /// The price check runs before anything is written, so an oracle failure or
    /// an amount below the floor leaves the ledger untouched. On success the
    /// tokens move from `funder` to the contract and the funder's new cumulative
    /// contribution is returned.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<i128, Error> {
        funder.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let config = load_config(&env);
        let reference_value = oracle::to_reference_value(&env, &config, amount)?;
        if reference_value < config.minimum_reference_value {
            return Err(Error::BelowMinimumContribution);
        }

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&funder, &env.current_contract_address(), &amount);

        let total = ledger::record(&env, &funder, amount)?;

        events::emit_funded(&env, funder, amount, total, reference_value);

        Ok(total)
    }

    /// Sweep the whole balance to the owner and reset the ledger.
    ///
    /// Walks the contributor list straight from storage. Returns the amount
    /// transferred.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        sweep(&env, &caller, ResetStrategy::Direct)
    }

    /// Same outcome as `withdraw`, but loads the contributor list once and
    /// resets from the in-memory copy, which costs fewer storage reads.
    pub fn withdraw_optimized(env: Env, caller: Address) -> Result<i128, Error> {
        sweep(&env, &caller, ResetStrategy::Cached)
    }

    // ─── Queries ─────────────────────────────────────────

    pub fn get_owner(env: Env) -> Address {
        load_config(&env).owner
    }

    pub fn is_owner(env: Env, caller: Address) -> bool {
        access::is_owner(&env, &caller)
    }

    pub fn get_price_feed(env: Env) -> Address {
        load_config(&env).price_feed
    }

    pub fn get_token(env: Env) -> Address {
        load_config(&env).token
    }

    pub fn get_minimum_reference_value(env: Env) -> i128 {
        load_config(&env).minimum_reference_value
    }

    /// Cumulative contribution of `contributor` in the current epoch (0 if none).
    pub fn get_contribution(env: Env, contributor: Address) -> i128 {
        storage::get_contribution(&env, &contributor)
    }

    /// Contributor at `index` in first-contribution order.
    pub fn get_contributor(env: Env, index: u32) -> Result<Address, Error> {
        storage::get_contributor(&env, index).ok_or(Error::ContributorNotFound)
    }

    pub fn get_contributor_count(env: Env) -> u32 {
        get_contributor_count(&env)
    }

    pub fn get_contributors(env: Env) -> Vec<Address> {
        ledger::contributors(&env)
    }

    pub fn get_total_contributed(env: Env) -> Result<i128, Error> {
        ledger::total_contributed(&env)
    }

    /// Base-currency balance currently held by the contract.
    pub fn get_balance(env: Env) -> i128 {
        let config = load_config(&env);
        token::Client::new(&env, &config.token).balance(&env.current_contract_address())
    }

    /// Number of completed withdrawals.
    pub fn get_epoch(env: Env) -> u32 {
        get_epoch(&env)
    }

    pub fn get_status(env: Env) -> LedgerStatus {
        if get_contributor_count(&env) == 0 {
            LedgerStatus::Empty
        } else {
            LedgerStatus::Funding
        }
    }

    /// Quote `amount` base units in the reference currency at the current price.
    pub fn to_reference_value(env: Env, amount: i128) -> Result<i128, Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        let config = load_config(&env);
        oracle::to_reference_value(&env, &config, amount)
    }
}

/// Shared body of both withdrawal entry points.
///
/// The ledger is reset before the outbound transfer. If the transfer fails the
/// call returns `TransferFailed`, and the host discards every write made in
/// this invocation, the reset included.
fn sweep(env: &Env, caller: &Address, strategy: ResetStrategy) -> Result<i128, Error> {
    require_owner(env, caller)?;

    let config = load_config(env);
    let token_client = token::Client::new(env, &config.token);
    let contract = env.current_contract_address();

    let total = token_client.balance(&contract);
    let cleared = ledger::reset_all(env, strategy);
    let epoch = increment_epoch(env);

    if total > 0 {
        match token_client.try_transfer(&contract, &config.owner, &total) {
            Ok(Ok(())) => {}
            _ => return Err(Error::TransferFailed),
        }
    }

    events::emit_withdrawn(env, config.owner, total, cleared, epoch);

    Ok(total)
}
