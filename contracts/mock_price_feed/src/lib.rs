#![no_std]

//! Settable price feed for local development.
//!
//! Exposes the same `decimals` / `lastprice` interface the ledger consumes,
//! plus setters so tests and the sandbox can move the price, age it, or take
//! the feed offline.

use soroban_sdk::{contract, contractimpl, contracttype, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Decimals,
    Latest,
    Broken,
}

#[contract]
pub struct MockPriceFeed;

#[contractimpl]
impl MockPriceFeed {
    /// Start the feed at `initial_answer`, stamped with the current ledger time.
    pub fn __constructor(env: Env, decimals: u32, initial_answer: i128) {
        env.storage().instance().set(&DataKey::Decimals, &decimals);
        Self::update_answer(env, initial_answer);
    }

    pub fn decimals(env: Env) -> u32 {
        Self::ensure_working(&env);
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .unwrap_or(0)
    }

    pub fn lastprice(env: Env) -> Option<PriceData> {
        Self::ensure_working(&env);
        env.storage().instance().get(&DataKey::Latest)
    }

    /// Publish `answer` as of the current ledger time.
    pub fn update_answer(env: Env, answer: i128) {
        let timestamp = env.ledger().timestamp();
        Self::update_round(env, answer, timestamp);
    }

    /// Publish `answer` with an explicit timestamp, e.g. to simulate a stale round.
    pub fn update_round(env: Env, answer: i128, timestamp: u64) {
        env.storage().instance().set(
            &DataKey::Latest,
            &PriceData {
                price: answer,
                timestamp,
            },
        );
    }

    /// Forget the latest round; `lastprice` returns `None` afterwards.
    pub fn clear(env: Env) {
        env.storage().instance().remove(&DataKey::Latest);
    }

    /// Make every read trap, as an unreachable feed would.
    pub fn set_broken(env: Env, broken: bool) {
        env.storage().instance().set(&DataKey::Broken, &broken);
    }

    fn ensure_working(env: &Env) {
        let broken: bool = env
            .storage()
            .instance()
            .get(&DataKey::Broken)
            .unwrap_or(false);
        if broken {
            panic!("price feed unavailable");
        }
    }
}
