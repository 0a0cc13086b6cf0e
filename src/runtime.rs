//! Runtime abstraction layer for async operations
//!
//! The synchronization core is single-threaded: places, observers and the
//! map surface live behind `Rc`/`RefCell`, so every task spawned here is a
//! local (`!Send`) future that runs as its own turn of the event loop.
//! This module provides the runtime-agnostic seam plus two spawners: one on a
//! Tokio `LocalSet` and one on a `futures` local pool with manually fired
//! timers.

use crate::Result;
use futures::future::LocalBoxFuture;
use std::time::Duration;

/// A runtime able to run local tasks and provide timers
pub trait LocalRuntime {
    /// Spawn a task onto the event loop. The caller returns immediately; the
    /// task's continuation runs on a later turn.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<()>;

    /// A future that completes once `duration` has elapsed
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;

        /// Tokio-based spawner.
        ///
        /// Tasks go through [`tokio::task::spawn_local`], so every call must
        /// happen inside a [`tokio::task::LocalSet`] (typically on a
        /// current-thread runtime).
        #[derive(Debug, Clone, Copy, Default)]
        pub struct TokioRuntime;

        impl LocalRuntime for TokioRuntime {
            fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<()> {
                ::tokio::task::spawn_local(task);
                Ok(())
            }

            fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
                Box::pin(::tokio::time::sleep(duration))
            }
        }
    }

    pub mod manual {
        use super::*;
        use crate::MapError;
        use futures::channel::oneshot;
        use futures::executor::{LocalPool, LocalSpawner};
        use futures::task::LocalSpawnExt;
        use std::cell::RefCell;
        use std::rc::Rc;

        struct PendingTimer {
            duration: Duration,
            fire: oneshot::Sender<()>,
        }

        /// Deterministic spawner on top of a [`LocalPool`].
        ///
        /// Tasks only make progress when the owner drives the pool
        /// (`run_until_stalled`), and timers only elapse when
        /// [`fire_timers`](Self::fire_timers) is called.
        #[derive(Clone)]
        pub struct ManualRuntime {
            spawner: LocalSpawner,
            timers: Rc<RefCell<Vec<PendingTimer>>>,
        }

        impl ManualRuntime {
            pub fn new(pool: &LocalPool) -> Self {
                Self {
                    spawner: pool.spawner(),
                    timers: Rc::new(RefCell::new(Vec::new())),
                }
            }

            /// Number of timers still awaited by some task
            pub fn pending_timers(&self) -> usize {
                let mut timers = self.timers.borrow_mut();
                timers.retain(|t| !t.fire.is_canceled());
                timers.len()
            }

            /// Elapse every pending timer. Returns how many were still awaited.
            pub fn fire_timers(&self) -> usize {
                let timers = std::mem::take(&mut *self.timers.borrow_mut());
                let mut fired = 0;
                for timer in timers {
                    log::trace!("firing {:?} timer", timer.duration);
                    if timer.fire.send(()).is_ok() {
                        fired += 1;
                    }
                }
                fired
            }
        }

        impl LocalRuntime for ManualRuntime {
            fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) -> Result<()> {
                self.spawner
                    .spawn_local(task)
                    .map_err(|e| MapError::Spawn(e.to_string()))
            }

            fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
                let (fire, elapsed) = oneshot::channel();
                self.timers
                    .borrow_mut()
                    .push(PendingTimer { duration, fire });
                Box::pin(async move {
                    let _ = elapsed.await;
                })
            }
        }
    }
}
