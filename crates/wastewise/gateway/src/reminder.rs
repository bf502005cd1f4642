use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::{task::JoinHandle, time::sleep};
use tracing::{info, instrument, Level};
use wastewise_api::reminder::{
    Notification, NotificationInbox, Reminder, ReminderError, ReminderKey, ReminderRequest,
    ReminderState,
};

use crate::clock::Clock;

struct PendingReminder {
    generation: u64,
    reminder: Reminder,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    pending: BTreeMap<ReminderKey, PendingReminder>,
    inbox: NotificationInbox,
}

/// Collection reminders armed on tokio timers.
#[derive(Clone)]
pub struct ReminderService {
    clock: Clock,
    inner: Arc<Mutex<Inner>>,
}

impl ReminderService {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            inner: Arc::default(),
        }
    }

    /// Clears the reminder of the same collection if any, or arms a new one.
    #[instrument(level = Level::INFO, skip(self))]
    pub fn toggle(&self, request: ReminderRequest) -> Result<ReminderState, ReminderError> {
        let key = request.key();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(PendingReminder { timer, .. }) = inner.pending.remove(&key) {
            timer.abort();
            info!("Reminder cleared: {key}");
            return Ok(ReminderState::Cleared { key });
        }

        let now = self.clock.now();
        let fire_at = request.fire_at(now)?;
        let delay = (fire_at - now).to_std().unwrap_or_default();

        inner.generation += 1;
        let generation = inner.generation;
        let timer = {
            let service = self.clone();
            let key = key.clone();
            ::tokio::spawn(async move {
                sleep(delay).await;
                service.fire(&key, generation)
            })
        };

        info!("Reminder set: {key} at {fire_at}");
        inner.pending.insert(
            key.clone(),
            PendingReminder {
                generation,
                reminder: Reminder {
                    key: key.clone(),
                    request,
                    fire_at,
                },
                timer,
            },
        );
        Ok(ReminderState::Set { key, fire_at })
    }

    /// Delivers the reminder armed as `generation`; a timer of a reminder that
    /// was cleared meanwhile finds a newer generation and does nothing.
    fn fire(&self, key: &ReminderKey, generation: u64) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner
            .pending
            .get(key)
            .map_or(true, |pending| pending.generation != generation)
        {
            return;
        }
        if let Some(PendingReminder { reminder, .. }) = inner.pending.remove(key) {
            let message = reminder.request.message();
            info!("{message}");
            inner.inbox.push(Notification {
                key: reminder.key,
                message,
                fired_at: self.clock.now(),
            });
        }
    }

    pub fn list(&self) -> Vec<Reminder> {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .pending
            .values()
            .map(|pending| pending.reminder.clone())
            .collect()
    }

    /// Takes every fired notification out of the inbox.
    pub fn drain_notifications(&self) -> Vec<Notification> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.inbox.drain()
    }

    #[instrument(level = Level::INFO, skip(self))]
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for (_, PendingReminder { timer, .. }) in ::std::mem::take(&mut inner.pending) {
            timer.abort();
        }
    }
}
