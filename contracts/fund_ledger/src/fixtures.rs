// contracts/fund_ledger/src/fixtures.rs
//
// Shared fixtures for the contract tests.
//
// Defaults mirror a typical development deployment: a price feed quoting
// 2000.00000000 reference units per token with 8 decimals, a 7-decimal
// Stellar Asset Contract as the base currency, and a floor of 50 reference
// units. At that price the smallest fundable amount is 0.025 tokens.

use mock_price_feed::{MockPriceFeed, MockPriceFeedClient};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::{FundLedger, FundLedgerClient, DEFAULT_MAX_PRICE_AGE, DEFAULT_MINIMUM_REFERENCE_VALUE};

pub const FEED_DECIMALS: u32 = 8;
pub const INITIAL_ANSWER: i128 = 2_000_00000000;
pub const ONE_TOKEN: i128 = 10_000_000;
pub const MIN_FUNDABLE: i128 = 250_000;
pub const START_TIME: u64 = 1_700_000_000;
pub const FUNDER_MINT: i128 = 100 * ONE_TOKEN;

pub struct Fixture {
    pub env: Env,
    pub ledger: FundLedgerClient<'static>,
    pub feed: MockPriceFeedClient<'static>,
    pub token: token::Client<'static>,
    pub token_admin: token::StellarAssetClient<'static>,
    pub owner: Address,
}

impl Fixture {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START_TIME);

        let owner = Address::generate(&env);
        let issuer = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(issuer);
        let token = token::Client::new(&env, &sac.address());
        let token_admin = token::StellarAssetClient::new(&env, &sac.address());

        let feed_id = env.register(MockPriceFeed, (FEED_DECIMALS, INITIAL_ANSWER));
        let feed = MockPriceFeedClient::new(&env, &feed_id);

        let ledger_id = env.register(
            FundLedger,
            (
                owner.clone(),
                sac.address(),
                feed_id,
                DEFAULT_MINIMUM_REFERENCE_VALUE,
                DEFAULT_MAX_PRICE_AGE,
            ),
        );
        let ledger = FundLedgerClient::new(&env, &ledger_id);

        Fixture {
            env,
            ledger,
            feed,
            token,
            token_admin,
            owner,
        }
    }

    /// A fresh address holding `FUNDER_MINT` base units.
    pub fn funder(&self) -> Address {
        let funder = Address::generate(&self.env);
        self.token_admin.mint(&funder, &FUNDER_MINT);
        funder
    }

    /// `count` fresh funders, each contributing `amount`.
    pub fn fund_many(&self, count: u32, amount: i128) -> std::vec::Vec<Address> {
        (0..count)
            .map(|_| {
                let funder = self.funder();
                self.ledger.fund(&funder, &amount);
                funder
            })
            .collect()
    }
}

// ─── Token that can refuse incoming transfers ────────────

#[contracttype]
#[derive(Clone)]
pub enum TokenKey {
    Balance(Address),
    Rejected(Address),
}

/// Minimal SEP-41 subset whose `transfer` traps when the recipient has been
/// marked with `reject`.
#[contract]
pub struct RejectingToken;

#[contractimpl]
impl RejectingToken {
    pub fn decimals(_env: Env) -> u32 {
        7
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&TokenKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .instance()
            .set(&TokenKey::Balance(to), &(balance + amount));
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let rejected: bool = env
            .storage()
            .instance()
            .get(&TokenKey::Rejected(to.clone()))
            .unwrap_or(false);
        if rejected {
            panic!("recipient rejects transfers");
        }
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        env.storage()
            .instance()
            .set(&TokenKey::Balance(from), &(from_balance - amount));
        Self::mint(env, to, amount);
    }

    pub fn reject(env: Env, id: Address) {
        env.storage().instance().set(&TokenKey::Rejected(id), &true);
    }
}

pub struct RejectingFixture {
    pub env: Env,
    pub ledger: FundLedgerClient<'static>,
    pub token: RejectingTokenClient<'static>,
    pub owner: Address,
}

impl RejectingFixture {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(START_TIME);

        let owner = Address::generate(&env);
        let token_id = env.register(RejectingToken, ());
        let token = RejectingTokenClient::new(&env, &token_id);
        let feed_id = env.register(MockPriceFeed, (FEED_DECIMALS, INITIAL_ANSWER));

        let ledger_id = env.register(
            FundLedger,
            (
                owner.clone(),
                token_id,
                feed_id,
                DEFAULT_MINIMUM_REFERENCE_VALUE,
                DEFAULT_MAX_PRICE_AGE,
            ),
        );
        let ledger = FundLedgerClient::new(&env, &ledger_id);

        RejectingFixture {
            env,
            ledger,
            token,
            owner,
        }
    }

    pub fn funder(&self) -> Address {
        let funder = Address::generate(&self.env);
        self.token.mint(&funder, &FUNDER_MINT);
        funder
    }
}
