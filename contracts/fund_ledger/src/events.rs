use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funded {
    pub funder: Address,
    pub amount: i128,
    pub total: i128,
    pub reference_value: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub owner: Address,
    pub amount: i128,
    pub contributors: u32,
    pub epoch: u32,
}

pub fn emit_funded(env: &Env, funder: Address, amount: i128, total: i128, reference_value: i128) {
    let topics = (symbol_short!("funded"), funder.clone());
    let data = Funded {
        funder,
        amount,
        total,
        reference_value,
    };
    env.events().publish(topics, data);
}

pub fn emit_withdrawn(env: &Env, owner: Address, amount: i128, contributors: u32, epoch: u32) {
    let topics = (symbol_short!("withdrawn"), owner.clone());
    let data = Withdrawn {
        owner,
        amount,
        contributors,
        epoch,
    };
    env.events().publish(topics, data);
}
