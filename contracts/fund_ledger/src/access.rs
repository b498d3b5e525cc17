// contracts/fund_ledger/src/access.rs
//
// Single-owner access gate. The owner is captured by the constructor and has
// no setter.

use soroban_sdk::{Address, Env};

use crate::{storage::load_config, Error};

pub fn is_owner(env: &Env, caller: &Address) -> bool {
    load_config(env).owner == *caller
}

/// Gate for privileged entry points.
///
/// `caller` must authorize the invocation and be the owner; otherwise the
/// enclosing call aborts with `Error::Unauthorized` before any write.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !is_owner(env, caller) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}
