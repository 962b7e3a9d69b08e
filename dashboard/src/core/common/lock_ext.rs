// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, MutexGuard, PoisonError};

pub type StdMutex<T> = std::sync::Mutex<T>;

/// Shared, lockable value. Every module, the screen write section, and the manager
/// state live behind one of these.
pub type Safe<T> = Arc<StdMutex<T>>;

/// Acquire a [`StdMutex`] even if a previous holder panicked.
///
/// A panic inside a user key handler is caught by the input loop and reported in the
/// focused module, so the state it was guarding is still usable (all mutations are
/// single assignments or appends). Recovering the guard keeps the session alive
/// instead of cascading the panic into every later lock.
pub trait LockExt<T: ?Sized> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T>;
}

impl<T: ?Sized> LockExt<T> for StdMutex<T> {
    fn lock_or_recover(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_after_poison() {
        let shared: Safe<Vec<u8>> = Arc::new(StdMutex::new(vec![1]));
        let shared_clone = shared.clone();
        let _join_result = std::thread::spawn(move || {
            let _guard = shared_clone.lock().unwrap();
            panic!("poison it");
        })
        .join();

        assert!(shared.is_poisoned());
        let mut guard = shared.lock_or_recover();
        guard.push(2);
        assert_eq!(*guard, vec![1, 2]);
    }
}
