//! Test doubles shared by unit and integration tests
//!
//! Compiled for this crate's own tests, and for dependents that enable the
//! `test-util` feature.

use crate::{content::source::ContentSource, MapError, Result};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};

/// A content source whose requests stay pending until the test resolves them.
#[derive(Default)]
pub struct ControlledSource {
    pending: RefCell<Vec<(String, oneshot::Sender<Result<String>>)>>,
    calls: Cell<usize>,
}

impl ControlledSource {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Queries of requests still awaiting an answer, oldest first
    pub fn pending_queries(&self) -> Vec<String> {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|(_, tx)| !tx.is_canceled());
        pending.iter().map(|(query, _)| query.clone()).collect()
    }

    /// Answers the oldest live request for `query`
    pub fn resolve(&self, query: &str, outcome: Result<String>) -> bool {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|(_, tx)| !tx.is_canceled());
        match pending.iter().position(|(q, _)| q == query) {
            Some(index) => {
                let (_, tx) = pending.remove(index);
                tx.send(outcome).is_ok()
            }
            None => false,
        }
    }
}

#[async_trait(?Send)]
impl ContentSource for ControlledSource {
    async fn fetch(&self, query: &str) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push((query.to_owned(), tx));
        rx.await
            .unwrap_or_else(|_| Err(MapError::Spawn("request dropped".to_string())))
    }
}
