use soroban_sdk::{testutils::Address as _, Address};

use crate::fixtures::{Fixture, ONE_TOKEN};
use crate::Error;

#[test]
fn test_non_owner_cannot_withdraw() {
    let fx = Fixture::new();
    let funders = fx.fund_many(2, ONE_TOKEN);
    let attacker = funders.get(1).unwrap().clone();

    assert_eq!(
        fx.ledger.try_withdraw(&attacker),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        fx.ledger.try_withdraw_optimized(&attacker),
        Err(Ok(Error::Unauthorized))
    );

    // Nothing moved.
    assert_eq!(fx.ledger.get_balance(), 2 * ONE_TOKEN);
    assert_eq!(fx.ledger.get_contributor_count(), 2);
    for funder in funders.iter() {
        assert_eq!(fx.ledger.get_contribution(funder), ONE_TOKEN);
    }
    assert_eq!(fx.ledger.get_epoch(), 0);
}

#[test]
fn test_stranger_cannot_withdraw() {
    let fx = Fixture::new();
    fx.fund_many(1, ONE_TOKEN);
    let stranger = Address::generate(&fx.env);

    assert_eq!(
        fx.ledger.try_withdraw(&stranger),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(fx.token.balance(&stranger), 0);
    assert!(!fx.ledger.is_owner(&stranger));
}

#[test]
#[should_panic]
fn test_withdraw_requires_owner_signature() {
    let fx = Fixture::new();
    fx.fund_many(1, ONE_TOKEN);

    // Drop the blanket auth mock: the owner has not signed this call.
    fx.env.set_auths(&[]);
    fx.ledger.withdraw(&fx.owner);
}

#[test]
fn test_owner_is_fixed() {
    let fx = Fixture::new();
    let owner = fx.ledger.get_owner();

    fx.fund_many(3, ONE_TOKEN);
    fx.ledger.withdraw(&fx.owner);
    fx.fund_many(1, ONE_TOKEN);

    assert_eq!(fx.ledger.get_owner(), owner);
}
