//! Per-account serialization of transfers inside one process.
//!
//! Each transfer loads its own copy of the account, so the balance mutex on
//! [`Account`](crate::ledger::Account) only orders mutations within a single
//! request. [`AccountLocks`] orders whole requests: the holder of an account
//! number's guard runs the idempotency check, lookup, sufficiency check,
//! gateway call and persistence before the next request for that account
//! starts. Writers in other processes are caught by the store's guarded
//! update instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of async locks keyed by account number.
///
/// Entries are weak; a lock is dropped once no request holds or awaits it.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: Mutex<HashMap<String, Weak<AsyncMutex<()>>>>,
}

impl AccountLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive use of `account_number`.
    pub async fn acquire(&self, account_number: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| lock.strong_count() > 0);
            if let Some(lock) = locks.get(account_number).and_then(Weak::upgrade) {
                lock
            } else {
                let lock = Arc::new(AsyncMutex::new(()));
                locks.insert(account_number.to_string(), Arc::downgrade(&lock));
                lock
            }
        };
        lock.lock_owned().await
    }

    /// Number of accounts with a live lock.
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|lock| lock.strong_count() > 0)
            .count()
    }
}
