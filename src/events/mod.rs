use alloy_primitives::Address;
use ethnum::U256;

/// The block an event was emitted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BlockInfo {
    pub number: u64,
    /// Unix seconds.
    pub timestamp: u64,
    pub gas_used: u64,
}

/// A decoded log together with the contract that emitted it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub block: BlockInfo,
    /// The controller for `ChangeVerifiedToken`, the factory for `FundCreated`,
    /// the fund for every other event.
    pub address: Address,
    pub kind: EventType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventType {
    ChangeVerifiedToken {
        token: Address,
        is_verified: bool,
    },
    FundCreated {
        fund: Address,
        manager: Address,
    },
    Deposit {
        owner: Address,
        amount: U256,
        share: U256,
    },
    Withdraw {
        owner: Address,
        amount: U256,
        share: U256,
    },
    /// Fund share transfer.
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Init {
        pool_index: u32,
        position_index: u32,
        amount: U256,
    },
    Add {
        pool_index: u32,
        position_index: u32,
        amount: U256,
    },
    Sub {
        pool_index: u32,
        position_index: u32,
        proportion_x128: U256,
    },
    Move {
        pool_index: u32,
        sub_index: u32,
        add_index: u32,
        proportion_x128: U256,
    },
    SetPath {
        dist_token: Address,
        path: Vec<u8>,
    },
}

impl EventType {
    pub fn name(&self) -> &'static str {
        match self {
            EventType::ChangeVerifiedToken { .. } => "ChangeVerifiedToken",
            EventType::FundCreated { .. } => "FundCreated",
            EventType::Deposit { .. } => "Deposit",
            EventType::Withdraw { .. } => "Withdraw",
            EventType::Transfer { .. } => "Transfer",
            EventType::Init { .. } => "Init",
            EventType::Add { .. } => "Add",
            EventType::Sub { .. } => "Sub",
            EventType::Move { .. } => "Move",
            EventType::SetPath { .. } => "SetPath",
        }
    }
}
