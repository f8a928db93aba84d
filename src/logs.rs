use ic_canister_log::declare_log_buffer;

// High-priority messages: fund refreshes, settled fee deltas, handled events.
declare_log_buffer!(name = INFO, capacity = 1000);

// Low-priority messages: substituted defaults, skipped positions, reconciliation failures.
declare_log_buffer!(name = DEBUG, capacity = 1000);
