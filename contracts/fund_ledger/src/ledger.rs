// contracts/fund_ledger/src/ledger.rs
//
// Contribution ledger: cumulative amount per contributor plus the ordered list
// of distinct contributors for the current epoch.

use soroban_sdk::{Address, Env, Vec};

use crate::{
    storage::{
        clear_contribution, clear_contributor_count, get_contribution, get_contributor,
        get_contributor_count, push_contributor, remove_contributor, set_contribution,
    },
    types::ResetStrategy,
    Error,
};

/// Add `amount` to `contributor`'s stake and return the new cumulative amount.
///
/// The caller has already checked that `amount` is positive and clears the
/// minimum. A contributor enters the list only when its stake was zero, so
/// repeat contributions within one epoch never duplicate the list entry.
pub fn record(env: &Env, contributor: &Address, amount: i128) -> Result<i128, Error> {
    let previous = get_contribution(env, contributor);
    let updated = previous
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    if previous == 0 {
        push_contributor(env, contributor);
    }
    set_contribution(env, contributor, updated);

    Ok(updated)
}

/// Clear every contribution and empty the contributor list.
///
/// Returns the number of contributors that were cleared.
pub fn reset_all(env: &Env, strategy: ResetStrategy) -> u32 {
    match strategy {
        ResetStrategy::Direct => reset_direct(env),
        ResetStrategy::Cached => reset_cached(env),
    }
}

fn reset_direct(env: &Env) -> u32 {
    let mut index = 0;
    // Length and entry are read back from storage on every pass.
    while index < get_contributor_count(env) {
        if let Some(contributor) = get_contributor(env, index) {
            clear_contribution(env, &contributor);
        }
        remove_contributor(env, index);
        index += 1;
    }
    clear_contributor_count(env);
    index
}

fn reset_cached(env: &Env) -> u32 {
    let snapshot = contributors(env);
    let cleared = snapshot.len();
    for (index, contributor) in snapshot.iter().enumerate() {
        clear_contribution(env, &contributor);
        remove_contributor(env, index as u32);
    }
    clear_contributor_count(env);
    cleared
}

/// Load the full contributor list in order.
pub fn contributors(env: &Env) -> Vec<Address> {
    let count = get_contributor_count(env);
    let mut list = Vec::new(env);
    for index in 0..count {
        if let Some(contributor) = get_contributor(env, index) {
            list.push_back(contributor);
        }
    }
    list
}

/// Sum of all recorded contributions in the current epoch.
pub fn total_contributed(env: &Env) -> Result<i128, Error> {
    let mut total: i128 = 0;
    for contributor in contributors(env).iter() {
        total = total
            .checked_add(get_contribution(env, &contributor))
            .ok_or(Error::ArithmeticOverflow)?;
    }
    Ok(total)
}
