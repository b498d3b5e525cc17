// contracts/fund_ledger/src/oracle.rs
//
// Price oracle adapter.
//
// Converts a base-currency amount (in the token's smallest unit) into its
// reference-currency value with `REFERENCE_DECIMALS` decimals, using the feed
// recorded in `Config`. Reads only; never touches ledger state.

use soroban_sdk::{contractclient, contracttype, Env};

use crate::{
    types::{Config, REFERENCE_DECIMALS},
    Error,
};

/// Latest quote published by a price feed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// Price of one whole base token, scaled by the feed's `decimals()`.
    pub price: i128,
    /// Ledger timestamp (seconds) at which the price was last updated.
    pub timestamp: u64,
}

/// Interface a price feed contract must expose.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Precision of `PriceData::price`.
    fn decimals(env: Env) -> u32;
    /// Most recent quote, or `None` if the feed has no data.
    fn lastprice(env: Env) -> Option<PriceData>;
}

/// Fetch a fresh, positive price from the configured feed.
pub fn latest_price(env: &Env, config: &Config) -> Result<PriceData, Error> {
    let feed = PriceFeedClient::new(env, &config.price_feed);

    let data = match feed.try_lastprice() {
        Ok(Ok(Some(data))) => data,
        _ => return Err(Error::OracleUnavailable),
    };

    if data.price <= 0 {
        return Err(Error::InvalidPrice);
    }

    let age = env.ledger().timestamp().saturating_sub(data.timestamp);
    if age > config.max_price_age {
        return Err(Error::StalePrice);
    }

    Ok(data)
}

/// Value of `amount` base units in the reference currency.
pub fn to_reference_value(env: &Env, config: &Config, amount: i128) -> Result<i128, Error> {
    let data = latest_price(env, config)?;

    let feed_decimals = match PriceFeedClient::new(env, &config.price_feed).try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(Error::OracleUnavailable),
    };

    let price = rescale(data.price, feed_decimals, REFERENCE_DECIMALS)?;
    let scaled = price
        .checked_mul(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    Ok(scaled / pow10(config.base_decimals)?)
}

/// Move `value` from `from` decimals to `to` decimals, truncating when shrinking.
fn rescale(value: i128, from: u32, to: u32) -> Result<i128, Error> {
    if from <= to {
        value
            .checked_mul(pow10(to - from)?)
            .ok_or(Error::ArithmeticOverflow)
    } else {
        Ok(value / pow10(from - to)?)
    }
}

fn pow10(exp: u32) -> Result<i128, Error> {
    10i128.checked_pow(exp).ok_or(Error::ArithmeticOverflow)
}
