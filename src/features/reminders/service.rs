//! # Reminder Service
//!
//! Routes inbound chat events to the conversation state machine, the
//! store, and the scheduler. Every mutation for a user happens inside one
//! `with_book` call, so a firing timer never sees a half-applied step.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use chrono::NaiveDateTime;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::conversation::{Conversation, Step, Target};
use super::delivery::Notifier;
use super::events::{ButtonAction, InboundEvent, Outbound};
use super::model::{Reminder, ReminderField, ReminderId, UserId};
use super::notify;
use super::registry::{ScheduleToken, ScheduledJob};
use super::scheduler::{FireCallback, FireFuture, Scheduler};
use super::store::{ReminderStore, UserBook};
use crate::core::error::{ReminderError, Result};
use crate::core::response::MAX_CHOICES;

/// Every command name the service understands
pub const COMMANDS: &[&str] = &[
    "start",
    "help",
    "add_reminder",
    "view_reminders",
    "view_expired",
    "edit_reminders",
    "delete_reminder",
    "cancel",
];

/// Dispatcher core shared by every transport handler
#[derive(Clone)]
pub struct ReminderService {
    store: ReminderStore,
    scheduler: Arc<dyn Scheduler>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderService {
    pub fn new(
        store: ReminderStore,
        scheduler: Arc<dyn Scheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            scheduler,
            notifier,
        }
    }

    pub fn store(&self) -> &ReminderStore {
        &self.store
    }

    /// Recognize a typed `/command` in a plain text message
    ///
    /// Accepts `/cancel` and `/cancel@BotName`; returns the command name.
    pub fn parse_text_command(body: &str) -> Option<&'static str> {
        let word = body.trim().strip_prefix('/')?.split_whitespace().next()?;
        let name = word.split('@').next().unwrap_or(word);
        COMMANDS.iter().copied().find(|known| *known == name)
    }

    /// Handle one inbound event; `None` means nothing to reply
    pub fn handle_event(&self, event: InboundEvent) -> Option<Outbound> {
        match event {
            InboundEvent::Command { user, name } => Some(self.handle_command(user, &name)),
            InboundEvent::Text { user, body } => self.handle_text(user, &body),
            InboundEvent::ButtonPress { user, payload } => {
                Some(self.handle_button(user, &payload))
            }
        }
    }

    fn handle_command(&self, user: UserId, name: &str) -> Outbound {
        debug!("Command /{name} from user {user}");
        match name {
            "start" | "help" => Outbound::text(user, notify::WELCOME),
            "add_reminder" => self.begin_create(user),
            "view_reminders" => {
                Outbound::text(user, notify::active_listing(&self.store.list_active(user)))
            }
            "view_expired" => {
                Outbound::text(user, notify::expired_listing(&self.store.list_expired(user)))
            }
            "edit_reminders" => self.selection_menu(
                user,
                notify::NOTHING_TO_EDIT,
                notify::SELECT_TO_EDIT,
                |r| ButtonAction::Edit(r.id),
            ),
            "delete_reminder" => self.selection_menu(
                user,
                notify::NOTHING_TO_DELETE,
                notify::SELECT_TO_DELETE,
                |r| ButtonAction::Delete(r.id),
            ),
            "cancel" => self.cancel(user),
            other => Outbound::text(user, format!("Unknown command: /{other}")),
        }
    }

    fn begin_create(&self, user: UserId) -> Outbound {
        self.store.with_book(user, |book| {
            abandon_conversation(user, book);
            book.set_conversation(Some(Conversation::create()));
        });
        Outbound::text(user, notify::ASK_NAME)
    }

    fn cancel(&self, user: UserId) -> Outbound {
        let reply = self.store.with_book(user, |book| {
            match abandon_conversation(user, book) {
                Some(true) => notify::EDIT_CANCELLED,
                Some(false) => notify::CREATE_CANCELLED,
                None => notify::NOTHING_TO_CANCEL,
            }
        });
        Outbound::text(user, reply)
    }

    fn selection_menu(
        &self,
        user: UserId,
        empty: &str,
        prompt: &str,
        action: fn(&Reminder) -> ButtonAction,
    ) -> Outbound {
        let reminders = self.store.list_active(user);
        if reminders.is_empty() {
            return Outbound::text(user, empty);
        }

        let mut body = prompt.to_string();
        if reminders.len() > MAX_CHOICES {
            body.push_str(&format!(
                "\n(Showing the first {MAX_CHOICES} of {} reminders.)",
                reminders.len()
            ));
        }

        Outbound::SendTextWithChoices {
            user,
            body,
            choices: notify::choices(&reminders[..reminders.len().min(MAX_CHOICES)], action),
        }
    }

    fn handle_text(&self, user: UserId, body: &str) -> Option<Outbound> {
        if let Some(command) = Self::parse_text_command(body) {
            return Some(self.handle_command(user, command));
        }

        // Idle users never get a book created just for chatting
        if self.store.conversation(user).is_none() {
            return None;
        }

        let reply = self.store.with_book(user, |book| {
            let conversation = book.conversation().cloned()?;
            let reply = match self.advance(user, book, conversation, body) {
                Ok(reply) => reply,
                Err(err @ ReminderError::NotFound(_)) => {
                    warn!("Conversation target vanished for user {user}: {err}");
                    book.set_conversation(None);
                    notify::error_message(&err)
                }
                Err(err) => {
                    debug!("Rejected input from user {user}: {err}");
                    notify::error_message(&err)
                }
            };
            Some(reply)
        })?;

        Some(Outbound::text(user, reply))
    }

    /// Apply one text message to the conversation
    ///
    /// On any error the stored conversation and reminder are untouched.
    fn advance(
        &self,
        user: UserId,
        book: &mut UserBook,
        mut conversation: Conversation,
        body: &str,
    ) -> Result<String> {
        let field = conversation.interpret(body)?;
        if conversation.step == Step::AwaitingTime {
            return self.finish(user, book, conversation, field);
        }

        let reply = progress_reply(&field);
        match &mut conversation.target {
            Target::Create(target @ None) => {
                let ReminderField::Name(name) = field else {
                    return Err(ReminderError::NotFound("reminder in progress".to_string()));
                };
                let (id, _) = book.create(name);
                *target = Some(id);
            }
            Target::Create(Some(id)) => book.update_field(*id, field)?,
            Target::Edit(draft) => {
                if book.get(draft.id).is_none() {
                    return Err(ReminderError::NotFound(format!("reminder {}", draft.id)));
                }
                draft.apply(field);
            }
        }

        book.set_conversation(conversation.advance());
        Ok(reply)
    }

    /// Last step: set the time, schedule, and return to idle
    fn finish(
        &self,
        user: UserId,
        book: &mut UserBook,
        conversation: Conversation,
        field: ReminderField,
    ) -> Result<String> {
        let (mut candidate, editing) = match conversation.target {
            Target::Create(Some(id)) => {
                let stored = book
                    .get(id)
                    .cloned()
                    .ok_or_else(|| ReminderError::NotFound(format!("reminder {id}")))?;
                (stored, false)
            }
            Target::Edit(draft) => {
                if book.get(draft.id).is_none() {
                    return Err(ReminderError::NotFound(format!("reminder {}", draft.id)));
                }
                (draft, true)
            }
            Target::Create(None) => {
                return Err(ReminderError::NotFound("reminder in progress".to_string()))
            }
        };

        candidate.apply(field);
        let at = candidate
            .fire_at()
            .ok_or_else(|| ReminderError::NotFound(format!("date of reminder {}", candidate.id)))?;

        let job = self.schedule(user, candidate.id, at)?;

        book.replace(candidate.clone())?;
        book.register_job(candidate.id, job);
        book.set_conversation(None);

        if editing {
            info!("Rescheduled reminder {} for user {user} at {at}", candidate.id);
            Ok(notify::rescheduled(&candidate, at))
        } else {
            info!("Scheduled reminder {} for user {user} at {at}", candidate.id);
            Ok(notify::scheduled(&candidate, at))
        }
    }

    /// Ask the timer facility for a one-shot firing of `id` at `at`
    fn schedule(&self, user: UserId, id: ReminderId, at: NaiveDateTime) -> Result<ScheduledJob> {
        let token = ScheduleToken::new();
        let store = self.store.clone();
        let notifier = Arc::clone(&self.notifier);
        let callback: FireCallback = Box::new(move || -> FireFuture {
            Box::pin(fire_reminder(store, notifier, user, id, token))
        });

        let handle = self.scheduler.schedule_once(at, callback).map_err(|e| {
            warn!("Could not schedule reminder {id} for user {user}: {e}");
            e
        })?;
        Ok(ScheduledJob::new(token, handle))
    }

    fn handle_button(&self, user: UserId, payload: &str) -> Outbound {
        let Some(action) = ButtonAction::parse(payload) else {
            warn!("Unrecognized button payload '{payload}' from user {user}");
            return Outbound::text(user, notify::UNKNOWN_BUTTON);
        };

        let reply = self.store.with_book(user, |book| match action {
            ButtonAction::Edit(id) => {
                if book.get(id).is_none() {
                    return notify::NO_LONGER_AVAILABLE.to_string();
                }
                abandon_conversation(user, book);
                match book.get(id).cloned() {
                    Some(reminder) => {
                        book.set_conversation(Some(Conversation::edit(&reminder)));
                        info!("User {user} is editing reminder {id}");
                        notify::editing(&reminder)
                    }
                    None => notify::NO_LONGER_AVAILABLE.to_string(),
                }
            }
            ButtonAction::Delete(id) => match book.delete(id) {
                Ok(removed) => {
                    info!("Deleted reminder {id} for user {user}");
                    notify::deleted(&removed)
                }
                Err(err) => {
                    debug!("Delete of reminder {id} for user {user} failed: {err}");
                    notify::error_message(&err)
                }
            },
        });

        Outbound::text(user, reply)
    }
}

/// Drop any in-progress conversation without committing it
///
/// Returns `Some(true)` for an abandoned edit, `Some(false)` for an
/// abandoned creation, `None` when the user was idle. An unfinished new
/// reminder is removed from the active list.
fn abandon_conversation(user: UserId, book: &mut UserBook) -> Option<bool> {
    let conversation = book.take_conversation()?;
    if let Target::Create(Some(id)) = conversation.target {
        if book.delete(id).is_ok() {
            debug!("Discarded unfinished reminder {id} for user {user}");
        }
    }
    Some(conversation.is_editing())
}

fn progress_reply(field: &ReminderField) -> String {
    match field {
        ReminderField::Name(name) => notify::name_set(name),
        ReminderField::Description(description) => notify::description_set(description),
        ReminderField::Date(date) => notify::date_set(date),
        ReminderField::Time(time) => format!("Reminder time set as: {}.", time.format("%H:%M")),
    }
}

/// Firing callback body: move the reminder to expired, then notify
///
/// The store update happens under the user's lock; delivery happens after
/// it is released.
pub async fn fire_reminder(
    store: ReminderStore,
    notifier: Arc<dyn Notifier>,
    user: UserId,
    id: ReminderId,
    token: ScheduleToken,
) {
    let Some(reminder) = store.fire(user, id, token) else {
        debug!("Ignoring stale timer for reminder {id} of user {user}");
        return;
    };

    info!("Reminder {id} fired for user {user}");
    if let Err(e) = notifier
        .deliver(Outbound::text(user, notify::due(&reminder)))
        .await
    {
        error!("Failed to deliver reminder {id} to user {user}: {e}");
    }
}
