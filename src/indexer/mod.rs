//! Entry point of the indexer: owns the configuration, the chain reader and the
//! record store, and routes each decoded event to its handler.

use alloy_primitives::Address;
use ic_canister_log::log;
use ic_stable_structures::{DefaultMemoryImpl, Memory};

use crate::{
    chain::{CallError, ChainReader},
    config::IndexerConfig,
    events::{BlockInfo, Event, EventType},
    fund::{PositionSlot, create_fund, update_fees},
    guard::FundGuardError,
    libraries::path_key::PathError,
    logs::INFO,
    path::set_path,
    state::State,
    token::change_verified_token,
};

pub mod block;
pub mod investment;
pub mod liquidity;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexerError {
    /// A record an earlier event should have created is absent.
    MissingRecord { kind: &'static str, id: String },
    AlreadyProcessing { fund: Address },
    InvalidPath {
        fund: Address,
        dist_token: Address,
        reason: PathError,
    },
    /// An `Init` for a slot that is not the next one of its fund.
    UnexpectedSlot {
        fund: Address,
        pool_index: u32,
        position_index: u32,
    },
    /// A read without a usable default reverted.
    CallFailed(CallError),
}

impl IndexerError {
    pub fn missing(kind: &'static str, id: String) -> Self {
        IndexerError::MissingRecord { kind, id }
    }
}

impl From<FundGuardError> for IndexerError {
    fn from(e: FundGuardError) -> Self {
        match e {
            FundGuardError::AlreadyProcessing { fund } => IndexerError::AlreadyProcessing { fund },
        }
    }
}

impl From<CallError> for IndexerError {
    fn from(e: CallError) -> Self {
        IndexerError::CallFailed(e)
    }
}

pub struct Indexer<R, M: Memory = DefaultMemoryImpl> {
    pub config: IndexerConfig,
    pub chain: R,
    pub state: State<M>,
}

impl<R: ChainReader, M: Memory> Indexer<R, M> {
    pub fn new(config: IndexerConfig, chain: R, memory: M) -> Self {
        Self {
            config,
            chain,
            state: State::init(memory),
        }
    }

    /// Applies one event. Events must arrive in chain order.
    pub fn handle_event(&mut self, event: &Event) -> Result<(), IndexerError> {
        let Event {
            block,
            address,
            kind,
        } = event;
        let (state, config, chain) = (&mut self.state, &self.config, &self.chain);
        let fund = *address;

        match kind {
            EventType::ChangeVerifiedToken { token, is_verified } => {
                change_verified_token(state, chain, *address, *token, *is_verified);
            }
            EventType::FundCreated { fund, manager } => {
                create_fund(state, config, chain, *fund, *manager);
            }
            EventType::Deposit {
                owner,
                amount,
                share,
            } => investment::handle_deposit(
                state,
                config,
                chain,
                block,
                fund,
                investment::InvestmentAction {
                    owner: *owner,
                    amount: *amount,
                    share: *share,
                },
            )?,
            EventType::Withdraw {
                owner,
                amount,
                share,
            } => investment::handle_withdraw(
                state,
                config,
                chain,
                block,
                fund,
                investment::InvestmentAction {
                    owner: *owner,
                    amount: *amount,
                    share: *share,
                },
            )?,
            EventType::Transfer { from, to, value } => {
                investment::handle_transfer(state, config, chain, block, fund, *from, *to, *value)?
            }
            EventType::Init {
                pool_index,
                position_index,
                amount,
            } => liquidity::handle_init(
                state,
                config,
                chain,
                block,
                fund,
                PositionSlot {
                    pool_index: *pool_index,
                    position_index: *position_index,
                },
                *amount,
            )?,
            EventType::Add {
                pool_index,
                position_index,
                ..
            }
            | EventType::Sub {
                pool_index,
                position_index,
                ..
            } => {
                update_fees(
                    state,
                    config,
                    chain,
                    block,
                    fund,
                    Some(PositionSlot {
                        pool_index: *pool_index,
                        position_index: *position_index,
                    }),
                )?;
            }
            EventType::Move {
                pool_index,
                sub_index,
                add_index,
                ..
            } => liquidity::handle_move(
                state,
                config,
                chain,
                block,
                fund,
                *pool_index,
                *sub_index,
                *add_index,
            )?,
            EventType::SetPath { dist_token, path } => {
                set_path(state, chain, fund, *dist_token, path)?;
            }
        }

        log!(
            INFO,
            "[handle_event]: {} of {address} at block {}",
            kind.name(),
            block.number
        );
        Ok(())
    }

    /// Runs the periodic refresh if `block` is due for one. Returns whether it ran.
    pub fn handle_block(&mut self, block: &BlockInfo) -> Result<bool, IndexerError> {
        block::handle_block(&mut self.state, &self.config, &self.chain, block)
    }
}
