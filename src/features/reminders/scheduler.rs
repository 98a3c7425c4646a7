//! # One-shot timer facility
//!
//! Narrow interface to "run this callback at that instant" plus a tokio
//! implementation. The reminder core only ever talks to the [`Scheduler`]
//! trait, so tests can drive firings by hand.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::{Local, NaiveDateTime};
use log::debug;
use std::future::Future;
use std::pin::Pin;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::core::error::{ReminderError, Result};

/// Future produced by a firing callback
pub type FireFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Work to run once the scheduled instant arrives
pub type FireCallback = Box<dyn FnOnce() -> FireFuture + Send + 'static>;

/// Cancellable handle to a pending timer
///
/// Cancelling is best-effort; once the callback has run it is a no-op.
pub trait CancelHandle: Send + Sync {
    fn cancel(&self);
}

/// Schedules callbacks at arbitrary future instants (naive local time)
pub trait Scheduler: Send + Sync {
    fn schedule_once(
        &self,
        at: NaiveDateTime,
        callback: FireCallback,
    ) -> Result<Box<dyn CancelHandle>>;
}

impl CancelHandle for AbortHandle {
    fn cancel(&self) {
        self.abort();
    }
}

/// Scheduler backed by sleeping tokio tasks
///
/// Instants at or before the current local time are rejected.
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Bind to the runtime this is called from
    pub fn from_current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| ReminderError::Scheduling(format!("no tokio runtime available: {e}")))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(
        &self,
        at: NaiveDateTime,
        callback: FireCallback,
    ) -> Result<Box<dyn CancelHandle>> {
        let now = Local::now().naive_local();
        if at <= now {
            return Err(ReminderError::Scheduling(format!(
                "{} is not in the future",
                at.format("%Y-%m-%d %H:%M")
            )));
        }

        let delay = (at - now)
            .to_std()
            .map_err(|e| ReminderError::Scheduling(e.to_string()))?;

        debug!("Scheduling callback in {}s (at {at})", delay.as_secs());

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback().await;
        });

        Ok(Box::new(task.abort_handle()))
    }
}

#[cfg(test)]
pub mod testing {
    //! Hand-driven scheduler for tests

    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// Flag-based handle so tests can observe cancellation
    #[derive(Clone, Default)]
    pub struct ManualHandle {
        cancelled: Arc<AtomicBool>,
    }

    impl ManualHandle {
        pub fn is_cancelled(&self) -> bool {
            self.cancelled.load(Ordering::SeqCst)
        }
    }

    impl CancelHandle for ManualHandle {
        fn cancel(&self) {
            self.cancelled.store(true, Ordering::SeqCst);
        }
    }

    pub struct PendingTimer {
        pub at: NaiveDateTime,
        pub handle: ManualHandle,
        callback: Option<FireCallback>,
    }

    /// Records every scheduled callback; rejects instants before `now`
    #[derive(Clone)]
    pub struct ManualScheduler {
        now: NaiveDateTime,
        timers: Arc<Mutex<Vec<PendingTimer>>>,
    }

    impl ManualScheduler {
        pub fn new(now: NaiveDateTime) -> Self {
            Self {
                now,
                timers: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn scheduled_count(&self) -> usize {
            self.timers.lock().unwrap().len()
        }

        pub fn instant(&self, index: usize) -> NaiveDateTime {
            self.timers.lock().unwrap()[index].at
        }

        pub fn handle(&self, index: usize) -> ManualHandle {
            self.timers.lock().unwrap()[index].handle.clone()
        }

        /// Run the callback registered at `index`, even if it was cancelled
        ///
        /// Simulates a timer that woke up before its cancellation landed.
        pub async fn fire(&self, index: usize) {
            let callback = self.timers.lock().unwrap()[index].callback.take();
            if let Some(callback) = callback {
                callback().await;
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_once(
            &self,
            at: NaiveDateTime,
            callback: FireCallback,
        ) -> Result<Box<dyn CancelHandle>> {
            if at <= self.now {
                return Err(ReminderError::Scheduling(format!("{at} is not in the future")));
            }
            let handle = ManualHandle::default();
            self.timers.lock().unwrap().push(PendingTimer {
                at,
                handle: handle.clone(),
                callback: Some(callback),
            });
            Ok(Box::new(handle))
        }
    }
}
