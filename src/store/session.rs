//! Scoped store handle
//!
//! A `StoreSession` owns the store for the length of one run. `close` releases
//! it and reports the outcome; if the session is dropped first (early `?`
//! return, panic unwinding) `Drop` releases it instead and prints any failure.

use crate::store::CatalogStore;
use crate::Result;
use std::ops::{Deref, DerefMut};

pub struct StoreSession<S: CatalogStore> {
    store: S,
    released: bool,
}

impl<S: CatalogStore> StoreSession<S> {
    pub fn new(store: S) -> Self {
        StoreSession {
            store,
            released: false,
        }
    }

    /// Release the store and surface the release error, if any
    pub fn close(mut self) -> Result<()> {
        self.released = true;
        self.store.release()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: CatalogStore> Deref for StoreSession<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}

impl<S: CatalogStore> DerefMut for StoreSession<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<S: CatalogStore> Drop for StoreSession<S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.store.release() {
            eprintln!("error: failed to release catalog store: {e}");
        }
    }
}
