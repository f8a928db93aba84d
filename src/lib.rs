pub mod cbor;
pub mod chain;
pub mod config;
pub mod events;
pub mod fund;
pub mod guard;
pub mod historical;
pub mod indexer;
pub mod investor;
pub mod libraries;
pub mod logs;
pub mod path;
pub mod pool;
pub mod position;
pub mod price;
pub mod state;
pub mod tick;
pub mod token;

pub use indexer::{Indexer, IndexerError};

#[cfg(test)]
pub mod tests;
