// contracts/fund_ledger/src/storage.rs
//
// Storage helpers for FundLedger.
//
// Layout:
//   instance:
//     - DataKey::Config            → Config (written once by the constructor)
//     - DataKey::Epoch             → u32 (completed withdrawals)
//     - DataKey::ContributorCount  → u32 (length of the contributor list)
//   persistent:
//     - DataKey::Contributor(i)    → Address, for i in 0..ContributorCount
//     - DataKey::Contribution(a)   → i128; a missing entry reads as 0
//
// The contributor list is kept as one entry per index rather than a single
// Vec so that appending and indexed reads touch one small entry each.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::{types::Config, Error};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Epoch,
    ContributorCount,
    Contributor(u32),
    Contribution(Address),
}

// ─────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Load the deployment config. Every deployed instance has one, since the
/// constructor writes it before any other entry point can run.
pub fn load_config(env: &Env) -> Config {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .unwrap_or_else(|| panic_with_error!(env, Error::InvalidConfig))
}

// ─────────────────────────────────────────────────────────
// Epoch counter
// ─────────────────────────────────────────────────────────

pub fn get_epoch(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::Epoch)
        .unwrap_or(0)
}

/// Start a new epoch and return its number.
pub fn increment_epoch(env: &Env) -> u32 {
    let next = get_epoch(env) + 1;
    env.storage().instance().set(&DataKey::Epoch, &next);
    next
}

// ─────────────────────────────────────────────────────────
// Contributor list
// ─────────────────────────────────────────────────────────

pub fn get_contributor_count(env: &Env) -> u32 {
    #[cfg(test)]
    list_reads::bump();
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

fn set_contributor_count(env: &Env, count: u32) {
    if count == 0 {
        env.storage().instance().remove(&DataKey::ContributorCount);
    } else {
        env.storage()
            .instance()
            .set(&DataKey::ContributorCount, &count);
    }
}

/// Append `contributor` at the end of the list and return its index.
pub fn push_contributor(env: &Env, contributor: &Address) -> u32 {
    let index = get_contributor_count(env);
    env.storage()
        .persistent()
        .set(&DataKey::Contributor(index), contributor);
    set_contributor_count(env, index + 1);
    index
}

pub fn get_contributor(env: &Env, index: u32) -> Option<Address> {
    #[cfg(test)]
    list_reads::bump();
    env.storage()
        .persistent()
        .get(&DataKey::Contributor(index))
}

pub fn remove_contributor(env: &Env, index: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contributor(index));
}


/// Drop the list length. Callers remove the indexed entries themselves.
pub fn clear_contributor_count(env: &Env) {
    set_contributor_count(env, 0);
}

// ─────────────────────────────────────────────────────────
// Contributions
// ─────────────────────────────────────────────────────────

pub fn get_contribution(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Contribution(contributor.clone()), &amount);
}

/// Reset a contribution to zero by deleting its entry.
pub fn clear_contribution(env: &Env, contributor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contribution(contributor.clone()));
}
