// contracts/fund_ledger/src/types.rs
//
// Shared contract types and constants.
//
// `Config` is written once by the constructor and never mutated afterwards:
// the owner and the price feed are fixed for the lifetime of a deployment.

use soroban_sdk::{contracttype, Address};

/// Decimals carried by every reference-currency value produced by the oracle adapter.
pub const REFERENCE_DECIMALS: u32 = 18;

/// Default contribution floor: 50 units of the reference currency.
pub const DEFAULT_MINIMUM_REFERENCE_VALUE: i128 = 50 * 10i128.pow(REFERENCE_DECIMALS);

/// Default maximum age of an oracle price, in seconds.
pub const DEFAULT_MAX_PRICE_AGE: u64 = 3_600;

/// Immutable deployment parameters.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The only address allowed to withdraw. Never reassigned.
    pub owner: Address,
    /// Base-currency token contract (SEP-41) contributions are made in.
    pub token: Address,
    /// Price feed quoting one whole base token in the reference currency.
    pub price_feed: Address,
    /// Contribution floor, in reference-currency units with `REFERENCE_DECIMALS`.
    pub minimum_reference_value: i128,
    /// Oldest acceptable price, in seconds relative to the ledger timestamp.
    pub max_price_age: u64,
    /// Decimals of `token`, read from the token at construction.
    pub base_decimals: u32,
}

/// Observable phase of the current epoch.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerStatus {
    /// No contributions since construction or the last withdrawal.
    Empty,
    /// At least one contributor is recorded.
    Funding,
}

/// How `reset_all` walks the contributor list.
///
/// Both strategies leave the ledger in the same final state; they differ only
/// in how many storage reads they perform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResetStrategy {
    /// Re-read the list length and entry from storage on every iteration.
    Direct,
    /// Load the list once into memory, then clear from the local copy.
    Cached,
}
