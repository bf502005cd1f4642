use std::{collections::VecDeque, fmt};

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wastewise_core::error::ApiError;

use crate::{calendar::CollectionWindow, schedule::CollectionType};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Cannot set a reminder for a past time.")]
    PastTime,
    #[error("Reminder time does not exist in the configured time zone")]
    InvalidTime,
}

impl From<ReminderError> for ApiError {
    fn from(error: ReminderError) -> Self {
        Self::bad_request(error)
    }
}

/// Identifies a reminder as `{date}-{location}-{wasteType}`; toggling the
/// same collection twice clears it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderKey(String);

impl ReminderKey {
    pub fn new(date: NaiveDate, location: &str, waste_type: CollectionType) -> Self {
        Self(format!(
            "{date}-{location}-{kind}",
            kind = waste_type.display_name(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub date: NaiveDate,
    pub location: String,
    pub waste_type: CollectionType,
    pub window: CollectionWindow,
}

impl ReminderRequest {
    pub fn key(&self) -> ReminderKey {
        ReminderKey::new(self.date, &self.location, self.waste_type)
    }

    /// The moment the collection window opens, in the given zone.
    pub fn instant(&self, offset: FixedOffset) -> Result<DateTime<FixedOffset>, ReminderError> {
        offset
            .from_local_datetime(&self.date.and_time(self.window.start))
            .single()
            .ok_or(ReminderError::InvalidTime)
    }

    /// Resolves when the reminder should fire; it must be strictly ahead of `now`.
    pub fn fire_at(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<DateTime<FixedOffset>, ReminderError> {
        let fire_at = self.instant(*now.offset())?;
        if fire_at <= now {
            Err(ReminderError::PastTime)
        } else {
            Ok(fire_at)
        }
    }

    pub fn message(&self) -> String {
        let Self {
            date,
            location,
            waste_type,
            window,
        } = self;
        let kind = waste_type.display_name();
        format!("Reminder: {kind} collection in {location} on {date} between {window}!")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub key: ReminderKey,
    #[serde(flatten)]
    pub request: ReminderRequest,
    pub fire_at: DateTime<FixedOffset>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ReminderState {
    #[serde(rename_all = "camelCase")]
    Set {
        key: ReminderKey,
        fire_at: DateTime<FixedOffset>,
    },
    #[serde(rename_all = "camelCase")]
    Cleared { key: ReminderKey },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub key: ReminderKey,
    pub message: String,
    pub fired_at: DateTime<FixedOffset>,
}

/// Fired notifications waiting to be read; the oldest are dropped when full.
#[derive(Clone, Debug)]
pub struct NotificationInbox {
    capacity: usize,
    queue: VecDeque<Notification>,
}

impl Default for NotificationInbox {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl NotificationInbox {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            queue: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, notification: Notification) {
        while self.queue.len() >= self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde_json::json;

    use super::*;

    fn request() -> ReminderRequest {
        ReminderRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            location: "Downtown".into(),
            waste_type: CollectionType::GeneralWaste,
            window: "7:00 AM - 9:00 AM".parse().unwrap(),
        }
    }

    fn at(offset: FixedOffset, h: u32, m: u32) -> DateTime<FixedOffset> {
        offset
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2025, 3, 3)
                    .unwrap()
                    .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap()),
            )
            .unwrap()
    }

    #[test]
    fn key_uses_display_name() {
        assert_eq!(request().key().as_str(), "2025-03-03-Downtown-General Waste");
    }

    #[test]
    fn fire_at_window_start() {
        let colombo = FixedOffset::east_opt(330 * 60).unwrap();
        let now = at(colombo, 6, 0);
        assert_eq!(request().fire_at(now), Ok(at(colombo, 7, 0)));
    }

    #[test]
    fn refuse_past_or_present_time() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(request().fire_at(at(utc, 7, 0)), Err(ReminderError::PastTime));
        assert_eq!(request().fire_at(at(utc, 8, 0)), Err(ReminderError::PastTime));
        assert_eq!(
            ReminderError::PastTime.to_string(),
            "Cannot set a reminder for a past time.",
        );
    }

    #[test]
    fn render_message() {
        assert_eq!(
            request().message(),
            "Reminder: General Waste collection in Downtown on 2025-03-03 between 7:00 AM - 9:00 AM!",
        );
    }

    #[test]
    fn tag_toggle_state() {
        let state = ReminderState::Cleared {
            key: request().key(),
        };
        assert_eq!(
            ::serde_json::to_value(state).unwrap(),
            json!({"state": "cleared", "key": "2025-03-03-Downtown-General Waste"}),
        );
    }

    #[test]
    fn inbox_drops_oldest() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let mut inbox = NotificationInbox::with_capacity(2);
        for index in 0..3 {
            inbox.push(Notification {
                key: request().key(),
                message: format!("#{index}"),
                fired_at: at(utc, 7, 0),
            });
        }
        assert_eq!(inbox.len(), 2);

        let messages: Vec<_> = inbox.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, ["#1", "#2"]);
        assert!(inbox.is_empty());
    }
}
