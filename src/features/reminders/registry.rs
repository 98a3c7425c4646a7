//! Per-user map from reminder id to its pending timer
//!
//! The registry never owns reminder content, only the cancel handle and
//! the token the firing callback was created with.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::collections::HashMap;
use uuid::Uuid;

use super::model::ReminderId;
use super::scheduler::CancelHandle;

/// Identifies one particular registration of a reminder's timer
///
/// A callback only fires if its token is still the registered one, so a
/// timer that woke up just before being replaced or cancelled is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleToken(Uuid);

impl ScheduleToken {
    pub fn new() -> Self {
        ScheduleToken(Uuid::new_v4())
    }
}

impl Default for ScheduleToken {
    fn default() -> Self {
        Self::new()
    }
}

/// A live timer registration
pub struct ScheduledJob {
    pub token: ScheduleToken,
    handle: Box<dyn CancelHandle>,
}

impl ScheduledJob {
    pub fn new(token: ScheduleToken, handle: Box<dyn CancelHandle>) -> Self {
        Self { token, handle }
    }

    fn cancel(&self) {
        self.handle.cancel();
    }
}

#[derive(Default)]
pub struct ScheduleRegistry {
    jobs: HashMap<ReminderId, ScheduledJob>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job, cancelling whatever was registered for `id` before
    pub fn register(&mut self, id: ReminderId, job: ScheduledJob) {
        if let Some(previous) = self.jobs.insert(id, job) {
            previous.cancel();
        }
    }

    /// Cancel and forget the job for `id`; returns whether one existed
    pub fn cancel(&mut self, id: ReminderId) -> bool {
        match self.jobs.remove(&id) {
            Some(job) => {
                job.cancel();
                true
            }
            None => false,
        }
    }

    /// Consume the registration if `token` is the current one for `id`
    ///
    /// Called from the firing path; the timer has already run so nothing
    /// is cancelled.
    pub fn take_if_current(&mut self, id: ReminderId, token: ScheduleToken) -> bool {
        let current = self
            .jobs
            .get(&id)
            .map(|job| job.token == token)
            .unwrap_or(false);
        if current {
            self.jobs.remove(&id);
        }
        current
    }

    pub fn contains(&self, id: ReminderId) -> bool {
        self.jobs.contains_key(&id)
    }
}
