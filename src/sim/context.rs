//! Session-wide store slot
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The store lives for the whole page session once installed; every
//! accessor fails fast if it hasn't been.

use std::cell::RefCell;

use thiserror::Error;

use super::store::StateStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("game context not initialized: install the state store before using it")]
    NotInitialized,
}

thread_local! {
    static STORE: RefCell<Option<StateStore>> = const { RefCell::new(None) };
}

/// Create the session store. Keeps an already installed store.
pub fn install() {
    STORE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(StateStore::new());
            log::debug!("State store installed");
        }
    });
}

/// Drop the session store
pub fn uninstall() {
    STORE.with(|slot| {
        if slot.borrow_mut().take().is_some() {
            log::debug!("State store removed");
        }
    });
}

pub fn is_installed() -> bool {
    STORE.with(|slot| slot.borrow().is_some())
}

/// Execute a closure with read access to the store.
pub fn with_store<F, R>(f: F) -> Result<R, StoreError>
where
    F: FnOnce(&StateStore) -> R,
{
    STORE.with(|slot| slot.borrow().as_ref().map(f).ok_or(StoreError::NotInitialized))
}

/// Execute a closure with mutable access to the store.
pub fn with_store_mut<F, R>(f: F) -> Result<R, StoreError>
where
    F: FnOnce(&mut StateStore) -> R,
{
    STORE.with(|slot| {
        slot.borrow_mut()
            .as_mut()
            .map(f)
            .ok_or(StoreError::NotInitialized)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test runs on its own thread, so the thread-local slot starts empty.

    #[test]
    fn test_access_before_install_fails() {
        assert!(!is_installed());
        assert_eq!(with_store(|s| s.snapshot()), Err(StoreError::NotInitialized));
        assert_eq!(with_store_mut(|s| s.start()), Err(StoreError::NotInitialized));
    }

    #[test]
    fn test_install_then_mutate() {
        install();
        with_store_mut(|s| s.start()).unwrap();
        assert!(with_store(|s| s.state().started()).unwrap());

        // A second install keeps the running session
        install();
        assert!(with_store(|s| s.state().started()).unwrap());

        uninstall();
        assert!(with_store(|s| s.state().started()).is_err());
    }

    #[test]
    fn test_error_message() {
        let msg = StoreError::NotInitialized.to_string();
        assert!(msg.contains("not initialized"));
    }
}
