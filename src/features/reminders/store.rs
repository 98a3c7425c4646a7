//! # Reminder Store
//!
//! In-memory reminders per user: the active list, the expired list, the
//! conversation cursor, and the timer registry all live in one
//! [`UserBook`]. DashMap's entry guard gives every user a single
//! serialized mutation path shared by chat handlers and firing callbacks.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use dashmap::DashMap;
use log::debug;
use std::sync::Arc;

use super::conversation::Conversation;
use super::model::{Reminder, ReminderField, ReminderId, UserId};
use super::registry::{ScheduleRegistry, ScheduleToken, ScheduledJob};
use crate::core::error::{ReminderError, Result};

/// Everything the bot knows about one user
#[derive(Default)]
pub struct UserBook {
    active: Vec<Reminder>,
    expired: Vec<Reminder>,
    conversation: Option<Conversation>,
    registry: ScheduleRegistry,
}

impl UserBook {
    /// Append a new partial reminder; returns its id and current slot
    pub fn create(&mut self, name: impl Into<String>) -> (ReminderId, usize) {
        let reminder = Reminder::new(name);
        let id = reminder.id;
        self.active.push(reminder);
        (id, self.active.len() - 1)
    }

    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.active.iter().find(|r| r.id == id)
    }

    /// Display position of a reminder in the active list
    pub fn slot_of(&self, id: ReminderId) -> Option<usize> {
        self.active.iter().position(|r| r.id == id)
    }

    pub fn update_field(&mut self, id: ReminderId, field: ReminderField) -> Result<()> {
        let reminder = self
            .active
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        reminder.apply(field);
        Ok(())
    }

    /// Overwrite a stored reminder with an edited copy carrying the same id
    pub fn replace(&mut self, edited: Reminder) -> Result<()> {
        let slot = self.slot_of(edited.id).ok_or_else(|| not_found(edited.id))?;
        self.active[slot] = edited;
        Ok(())
    }

    /// Remove a reminder and cancel its timer
    ///
    /// Other reminders keep their ids and timers; only display slots shift.
    /// A conversation writing to the removed reminder ends with it.
    pub fn delete(&mut self, id: ReminderId) -> Result<Reminder> {
        let slot = self.slot_of(id).ok_or_else(|| not_found(id))?;
        let removed = self.active.remove(slot);
        self.registry.cancel(id);
        if self
            .conversation
            .as_ref()
            .and_then(Conversation::target_id)
            .is_some_and(|target| target == id)
        {
            self.conversation = None;
        }
        Ok(removed)
    }

    /// Move the reminder a timer was registered for into the expired list
    ///
    /// Returns `None` when `token` is stale (replaced or cancelled timer)
    /// or the reminder is gone.
    pub fn fire(&mut self, id: ReminderId, token: ScheduleToken) -> Option<Reminder> {
        if !self.registry.take_if_current(id, token) {
            return None;
        }
        let slot = self.slot_of(id)?;
        let reminder = self.active.remove(slot);
        self.expired.push(reminder.clone());
        Some(reminder)
    }

    /// Register a timer for `id`, replacing and cancelling any previous one
    pub fn register_job(&mut self, id: ReminderId, job: ScheduledJob) {
        self.registry.register(id, job);
    }

    pub fn has_job(&self, id: ReminderId) -> bool {
        self.registry.contains(id)
    }

    pub fn active(&self) -> &[Reminder] {
        &self.active
    }

    pub fn expired(&self) -> &[Reminder] {
        &self.expired
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn set_conversation(&mut self, conversation: Option<Conversation>) {
        self.conversation = conversation;
    }

    pub fn take_conversation(&mut self) -> Option<Conversation> {
        self.conversation.take()
    }
}

fn not_found(id: ReminderId) -> ReminderError {
    ReminderError::NotFound(format!("reminder {id}"))
}

/// Shared handle to every user's book
#[derive(Clone, Default)]
pub struct ReminderStore {
    books: Arc<DashMap<UserId, UserBook>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with exclusive access to one user's book, creating it if needed
    ///
    /// Keep `f` short and free of awaits; it holds the shard lock.
    pub fn with_book<R>(&self, user: UserId, f: impl FnOnce(&mut UserBook) -> R) -> R {
        let mut entry = self.books.entry(user).or_default();
        f(entry.value_mut())
    }

    /// Read-only access that does not create a book for unknown users
    fn read_book<R>(&self, user: UserId, f: impl FnOnce(&UserBook) -> R) -> Option<R> {
        self.books.get(&user).map(|book| f(book.value()))
    }

    pub fn create(&self, user: UserId, name: impl Into<String>) -> ReminderId {
        let (id, slot) = self.with_book(user, |book| book.create(name));
        debug!("Created partial reminder {id} at slot {slot} for user {user}");
        id
    }

    pub fn update_field(&self, user: UserId, id: ReminderId, field: ReminderField) -> Result<()> {
        self.with_book(user, |book| book.update_field(id, field))
    }

    /// Snapshot of the active list in creation order
    pub fn list_active(&self, user: UserId) -> Vec<Reminder> {
        self.read_book(user, |book| book.active().to_vec())
            .unwrap_or_default()
    }

    /// Snapshot of the expired list in firing order
    pub fn list_expired(&self, user: UserId) -> Vec<Reminder> {
        self.read_book(user, |book| book.expired().to_vec())
            .unwrap_or_default()
    }

    pub fn get(&self, user: UserId, id: ReminderId) -> Option<Reminder> {
        self.read_book(user, |book| book.get(id).cloned()).flatten()
    }

    pub fn delete(&self, user: UserId, id: ReminderId) -> Result<Reminder> {
        self.with_book(user, |book| book.delete(id))
    }

    pub fn fire(&self, user: UserId, id: ReminderId, token: ScheduleToken) -> Option<Reminder> {
        self.with_book(user, |book| book.fire(id, token))
    }

    /// Snapshot of the user's conversation cursor
    pub fn conversation(&self, user: UserId) -> Option<Conversation> {
        self.read_book(user, |book| book.conversation().cloned())
            .flatten()
    }

    #[cfg(test)]
    pub fn has_book(&self, user: UserId) -> bool {
        self.books.contains_key(&user)
    }

    pub fn has_job(&self, user: UserId, id: ReminderId) -> bool {
        self.read_book(user, |book| book.has_job(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::scheduler::testing::ManualHandle;

    const USER: UserId = 42;

    fn register(store: &ReminderStore, id: ReminderId) -> (ScheduleToken, ManualHandle) {
        let handle = ManualHandle::default();
        let token = ScheduleToken::new();
        store.with_book(USER, |book| {
            book.register_job(id, ScheduledJob::new(token, Box::new(handle.clone())))
        });
        (token, handle)
    }

    #[test]
    fn test_lists_empty_for_unknown_user() {
        let store = ReminderStore::new();
        assert!(store.list_active(7).is_empty());
        assert!(store.list_expired(7).is_empty());
        assert!(store.conversation(7).is_none());
    }

    #[test]
    fn test_create_appends_in_order() {
        let store = ReminderStore::new();
        let first = store.create(USER, "First");
        let second = store.create(USER, "Second");

        let active = store.list_active(USER);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, first);
        assert_eq!(active[1].id, second);
        assert!(store.list_active(USER + 1).is_empty());
    }

    #[test]
    fn test_update_field_missing_is_not_found() {
        let store = ReminderStore::new();
        let result = store.update_field(
            USER,
            ReminderId::new(),
            ReminderField::Description("x".to_string()),
        );
        assert!(matches!(result, Err(ReminderError::NotFound(_))));
    }

    #[test]
    fn test_delete_keeps_other_reminders_and_timers() {
        let store = ReminderStore::new();
        let first = store.create(USER, "First");
        let second = store.create(USER, "Second");
        let (_, first_handle) = register(&store, first);
        let (second_token, second_handle) = register(&store, second);

        let removed = store.delete(USER, first).unwrap();
        assert_eq!(removed.name, "First");
        assert!(first_handle.is_cancelled());
        assert!(!second_handle.is_cancelled());

        let active = store.list_active(USER);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Second");

        // The surviving timer still fires the right reminder
        let fired = store.fire(USER, second, second_token).unwrap();
        assert_eq!(fired.id, second);
        assert!(matches!(
            store.delete(USER, first),
            Err(ReminderError::NotFound(_))
        ));
    }

    #[test]
    fn test_fire_moves_specific_reminder_to_expired() {
        let store = ReminderStore::new();
        let first = store.create(USER, "First");
        let second = store.create(USER, "Second");
        let (token, _) = register(&store, second);

        let fired = store.fire(USER, second, token).unwrap();
        assert_eq!(fired.name, "Second");

        let active = store.list_active(USER);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, first);
        assert_eq!(store.list_expired(USER), vec![fired]);
        assert!(!store.has_job(USER, second));
    }

    #[test]
    fn test_fire_with_stale_token_is_ignored() {
        let store = ReminderStore::new();
        let id = store.create(USER, "Only");
        let (old_token, _) = register(&store, id);
        let (_new_token, _) = register(&store, id);

        assert!(store.fire(USER, id, old_token).is_none());
        assert_eq!(store.list_active(USER).len(), 1);
        assert!(store.list_expired(USER).is_empty());
    }

    #[test]
    fn test_delete_ends_conversation_targeting_it() {
        let store = ReminderStore::new();
        let id = store.create(USER, "Draft");
        let reminder = store.get(USER, id).unwrap();
        store.with_book(USER, |book| {
            book.set_conversation(Some(Conversation::edit(&reminder)))
        });

        store.delete(USER, id).unwrap();
        assert!(store.conversation(USER).is_none());
    }

    #[test]
    fn test_replace_overwrites_in_place() {
        let store = ReminderStore::new();
        let first = store.create(USER, "First");
        store.create(USER, "Second");

        let mut edited = store.get(USER, first).unwrap();
        edited.apply(ReminderField::Name("Renamed".to_string()));
        store.with_book(USER, |book| book.replace(edited)).unwrap();

        let active = store.list_active(USER);
        assert_eq!(active[0].name, "Renamed");
        assert_eq!(active[0].id, first);
        assert_eq!(active.len(), 2);
    }
}
