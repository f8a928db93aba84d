
use alloy_primitives::Address;
use std::{cell::RefCell, collections::HashSet};

/// Holds a fund for the duration of one fee refresh. A second refresh of the same
/// fund while the guard is alive is rejected.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FundGuard {
    fund: Address,
}

thread_local! {
    static GUARDED_FUNDS: RefCell<HashSet<Address>> = RefCell::new(HashSet::default());
}

#[derive(Debug, PartialEq, Eq)]
pub enum FundGuardError {
    AlreadyProcessing { fund: Address },
}

/// Mutates the guarded funds set using the provided closure.
pub fn mutate_guarded_funds<F, R>(f: F) -> R
where
    F: FnOnce(&mut HashSet<Address>) -> R,
{
    GUARDED_FUNDS.with(|s| f(&mut s.borrow_mut()))
}

impl FundGuard {
    pub fn new(fund: Address) -> Result<Self, FundGuardError> {
        mutate_guarded_funds(|guards| {
            if !guards.insert(fund) {
                return Err(FundGuardError::AlreadyProcessing { fund });
            }
            Ok(FundGuard { fund })
        })
    }
}

impl Drop for FundGuard {
    fn drop(&mut self) {
        mutate_guarded_funds(|guards| {
            guards.remove(&self.fund);
        });
    }
}
