use ic_stable_structures::{
    memory_manager::{MemoryId, MemoryManager, VirtualMemory},
    Memory,
};

pub const TOKENS_MEMORY_ID: MemoryId = MemoryId::new(0);
pub const FUNDS_MEMORY_ID: MemoryId = MemoryId::new(1);
pub const MANAGERS_MEMORY_ID: MemoryId = MemoryId::new(2);
pub const SUMMARY_MEMORY_ID: MemoryId = MemoryId::new(3);
pub const BUNDLE_MEMORY_ID: MemoryId = MemoryId::new(4);
pub const POOLS_MEMORY_ID: MemoryId = MemoryId::new(5);
pub const POSITIONS_MEMORY_ID: MemoryId = MemoryId::new(6);
pub const INVESTORS_MEMORY_ID: MemoryId = MemoryId::new(7);
pub const INVESTOR_SUMMARIES_MEMORY_ID: MemoryId = MemoryId::new(8);
pub const FUND_DAY_DATA_MEMORY_ID: MemoryId = MemoryId::new(9);
pub const INVESTOR_DAY_DATA_MEMORY_ID: MemoryId = MemoryId::new(10);
pub const PATHS_MEMORY_ID: MemoryId = MemoryId::new(11);
pub const PATH_POOLS_MEMORY_ID: MemoryId = MemoryId::new(12);

/// Hands out one virtual memory per record kind from a single backing memory.
pub struct RecordMemories<M: Memory> {
    manager: MemoryManager<M>,
}

impl<M: Memory> RecordMemories<M> {
    pub fn init(memory: M) -> Self {
        Self {
            manager: MemoryManager::init(memory),
        }
    }

    pub fn get(&self, id: MemoryId) -> VirtualMemory<M> {
        self.manager.get(id)
    }
}
