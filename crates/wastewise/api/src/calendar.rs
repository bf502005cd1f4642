//! Collection calendar: the fixed weekly city routes merged with the one-off
//! schedules recorded by the admins.

use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use strum::IntoEnumIterator;
use thiserror::Error;
use wastewise_core::error::ApiError;

use crate::{
    model::Id,
    reminder::ReminderKey,
    schedule::{CollectionType, Schedule},
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("You cannot select a past date: {date}")]
    PastDate { date: NaiveDate, today: NaiveDate },
    #[error("Invalid filter selected: {0}")]
    InvalidFilter(String),
    #[error("Invalid collection window: {0}")]
    InvalidWindow(String),
}

impl From<CalendarError> for ApiError {
    fn from(error: CalendarError) -> Self {
        Self::bad_request(error)
    }
}

/// A collection time window, rendered as `7:00 AM - 9:00 AM`.
///
/// One-off schedules only know when they start, so the end is optional.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionWindow {
    pub start: NaiveTime,
    pub end: Option<NaiveTime>,
}

impl CollectionWindow {
    const FORMAT_PARSE: &'static str = "%I:%M %p";
    const FORMAT_PRINT: &'static str = "%-I:%M %p";
    const SEPARATOR: &'static str = " - ";

    pub const fn at(start: NaiveTime) -> Self {
        Self { start, end: None }
    }

    pub const fn between(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn start_label(&self) -> String {
        self.start.format(Self::FORMAT_PRINT).to_string()
    }

    pub fn end_label(&self) -> Option<String> {
        self.end
            .map(|end| end.format(Self::FORMAT_PRINT).to_string())
    }
}

impl fmt::Display for CollectionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.start_label().fmt(f)?;
        match self.end_label() {
            Some(end) => write!(f, "{}{end}", Self::SEPARATOR),
            None => Ok(()),
        }
    }
}

impl FromStr for CollectionWindow {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |time: &str| {
            NaiveTime::parse_from_str(time.trim(), Self::FORMAT_PARSE)
                .map_err(|_| CalendarError::InvalidWindow(s.into()))
        };

        match s.split_once(Self::SEPARATOR.trim()) {
            Some((start, end)) => Ok(Self::between(parse(start)?, parse(end)?)),
            None => parse(s).map(Self::at),
        }
    }
}

impl Serialize for CollectionWindow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CollectionWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

/// A collection on one of the fixed city routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCollection {
    pub location: String,
    pub waste_type: CollectionType,
    pub window: CollectionWindow,
    pub route: String,
}

/// The weekly route plan, indexed from Monday.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    days: [Vec<RouteCollection>; 7],
}

impl Default for RouteTable {
    fn default() -> Self {
        use CollectionType::*;

        fn hm(hour: u32, min: u32) -> NaiveTime {
            NaiveTime::from_hms_opt(hour, min, 0).unwrap_or_default()
        }

        fn collect(
            location: &str,
            waste_type: CollectionType,
            (start, end): (u32, u32),
            route: &str,
        ) -> RouteCollection {
            RouteCollection {
                location: location.into(),
                waste_type,
                window: CollectionWindow::between(hm(start, 0), hm(end, 0)),
                route: format!("Route {route}"),
            }
        }

        Self {
            days: [
                vec![
                    collect("Downtown", GeneralWaste, (7, 9), "A"),
                    collect("Suburbs", Recyclables, (8, 10), "B"),
                    collect("Industrial Area", ElectronicWaste, (9, 11), "C"),
                ],
                vec![
                    collect("Rural", GreenWaste, (6, 8), "D"),
                    collect("Downtown", Recyclables, (10, 12), "A"),
                    collect("Suburbs", GeneralWaste, (7, 9), "B"),
                ],
                vec![
                    collect("Industrial Area", GeneralWaste, (5, 7), "C"),
                    collect("Rural", ElectronicWaste, (8, 10), "D"),
                ],
                vec![
                    collect("Downtown", GreenWaste, (9, 11), "A"),
                    collect("Suburbs", ElectronicWaste, (7, 9), "B"),
                ],
                vec![
                    collect("Industrial Area", Recyclables, (6, 8), "C"),
                    collect("Rural", GeneralWaste, (8, 10), "D"),
                ],
                vec![
                    collect("Downtown", ElectronicWaste, (7, 9), "A"),
                    collect("Suburbs", GreenWaste, (9, 11), "B"),
                ],
                vec![],
            ],
        }
    }
}

impl RouteTable {
    pub fn on(&self, weekday: Weekday) -> &[RouteCollection] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteCollection> {
        self.days.iter().flatten()
    }
}

/// The calendar filters as sent by the citizen; `All` disables a filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    #[serde(default, alias = "start")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub waste_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl CalendarQuery {
    const ALL: &'static str = "All";

    fn selected(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(Self::ALL))
    }

    pub fn filter(&self) -> Result<CalendarFilter, CalendarError> {
        let waste_type = Self::selected(&self.waste_type)
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| CalendarError::InvalidFilter(value.into()))
            })
            .transpose()?;

        Ok(CalendarFilter {
            waste_type,
            location: Self::selected(&self.location).map(Into::into),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|search| !search.is_empty())
                .map(str::to_lowercase),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalendarFilter {
    pub waste_type: Option<CollectionType>,
    pub location: Option<String>,
    search: Option<String>,
}

impl CalendarFilter {
    pub fn matches(&self, entry: &CalendarEntry) -> bool {
        self.waste_type
            .map_or(true, |waste_type| entry.waste_type == waste_type)
            && self
                .location
                .as_ref()
                .map_or(true, |location| &entry.location == location)
            && self.search.as_ref().map_or(true, |search| {
                entry.location.to_lowercase().contains(search)
                    || entry
                        .waste_type
                        .display_name()
                        .to_lowercase()
                        .contains(search)
                    || entry
                        .route
                        .as_ref()
                        .map_or(false, |route| route.to_lowercase().contains(search))
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub location: String,
    pub waste_type: CollectionType,
    pub window: CollectionWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_id: Option<Id>,
    pub reminder_key: ReminderKey,
}

impl CalendarEntry {
    fn from_route(date: NaiveDate, collection: &RouteCollection) -> Self {
        Self {
            date,
            location: collection.location.clone(),
            waste_type: collection.waste_type,
            window: collection.window,
            route: Some(collection.route.clone()),
            schedule_id: None,
            reminder_key: ReminderKey::new(date, &collection.location, collection.waste_type),
        }
    }

    fn from_schedule(schedule: &Schedule) -> Self {
        let spec = &schedule.spec;
        Self {
            date: spec.date,
            location: spec.location.clone(),
            waste_type: spec.waste_type,
            window: CollectionWindow::at(spec.time),
            route: None,
            schedule_id: Some(schedule.id),
            reminder_key: ReminderKey::new(spec.date, &spec.location, spec.waste_type),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: String,
    pub week_number: u32,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFilters {
    pub locations: Vec<String>,
    pub waste_types: Vec<CollectionType>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayBucket {
    pub weekday: String,
    pub schedules: Vec<Schedule>,
}

pub struct Calendar<'a> {
    routes: &'a RouteTable,
    schedules: &'a [Schedule],
}

impl<'a> Calendar<'a> {
    pub const fn new(routes: &'a RouteTable, schedules: &'a [Schedule]) -> Self {
        Self { routes, schedules }
    }

    /// Collections of a single day, earliest first.
    pub fn day(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        filter: &CalendarFilter,
    ) -> Result<CalendarDay, CalendarError> {
        ensure_not_past(date, today)?;
        Ok(self.collect_day(date, filter))
    }

    /// Seven consecutive days starting at `start`.
    pub fn week(
        &self,
        start: NaiveDate,
        today: NaiveDate,
        filter: &CalendarFilter,
    ) -> Result<Vec<CalendarDay>, CalendarError> {
        ensure_not_past(start, today)?;
        Ok(start
            .iter_days()
            .take(7)
            .map(|date| self.collect_day(date, filter))
            .collect())
    }

    pub fn filters(&self) -> CalendarFilters {
        let locations: BTreeSet<_> = self
            .routes
            .iter()
            .map(|collection| collection.location.as_str())
            .chain(self.schedules.iter().map(|s| s.spec.location.as_str()))
            .collect();

        CalendarFilters {
            locations: locations.into_iter().map(Into::into).collect(),
            waste_types: CollectionType::iter().collect(),
        }
    }

    fn collect_day(&self, date: NaiveDate, filter: &CalendarFilter) -> CalendarDay {
        let mut entries: Vec<_> = self
            .routes
            .on(date.weekday())
            .iter()
            .map(|collection| CalendarEntry::from_route(date, collection))
            .chain(
                self.schedules
                    .iter()
                    .filter(|schedule| schedule.spec.date == date)
                    .map(CalendarEntry::from_schedule),
            )
            .filter(|entry| filter.matches(entry))
            .collect();
        entries.sort_by(|a, b| {
            a.window
                .start
                .cmp(&b.window.start)
                .then_with(|| a.location.cmp(&b.location))
        });

        CalendarDay {
            date,
            weekday: weekday_name(date.weekday()).into(),
            week_number: week_number(date),
            entries,
        }
    }
}

fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), CalendarError> {
    if date < today {
        Err(CalendarError::PastDate { date, today })
    } else {
        Ok(())
    }
}

/// Groups the one-off schedules by weekday, Monday first.
pub fn bucket_by_weekday(schedules: &[Schedule]) -> Vec<WeekdayBucket> {
    let mut buckets: Vec<_> = WEEK
        .iter()
        .map(|weekday| WeekdayBucket {
            weekday: weekday_name(*weekday).into(),
            schedules: Vec::default(),
        })
        .collect();

    for schedule in schedules {
        let index = schedule.spec.date.weekday().num_days_from_monday() as usize;
        buckets[index].schedules.push(schedule.clone());
    }
    for bucket in &mut buckets {
        bucket
            .schedules
            .sort_by_key(|schedule| (schedule.spec.date, schedule.spec.time));
    }
    buckets
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Week of the year, counting from the Sunday-first week holding January 1st.
pub fn week_number(date: NaiveDate) -> u32 {
    let ordinal0 = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    let jan1 = (weekday + 7 - ordinal0 % 7) % 7;
    (ordinal0 + jan1 + 1).div_ceil(7)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationShift {
    Morning,
    LateMorning,
}

impl RotationShift {
    pub const fn of_week(week_number: u32) -> Self {
        if week_number % 2 == 0 {
            Self::Morning
        } else {
            Self::LateMorning
        }
    }

    const fn slot(self, index: usize) -> (CollectionType, u32) {
        use CollectionType::*;

        match (self, index % 4) {
            (Self::Morning, 0) => (GeneralWaste, 8),
            (Self::Morning, 1) => (Recyclables, 8),
            (Self::Morning, 2) => (ElectronicWaste, 9),
            (Self::Morning, _) => (GreenWaste, 9),
            (Self::LateMorning, 0) => (Recyclables, 10),
            (Self::LateMorning, 1) => (GeneralWaste, 10),
            (Self::LateMorning, 2) => (GreenWaste, 11),
            (Self::LateMorning, _) => (ElectronicWaste, 11),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationSlot {
    pub date: NaiveDate,
    pub waste_type: CollectionType,
    pub window: CollectionWindow,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationWeek {
    pub week_number: u32,
    pub shift: RotationShift,
    pub slots: Vec<RotationSlot>,
}

/// The alternating household pickup rotation for the seven days from `start`.
///
/// Even weeks run the morning shift and odd weeks the late-morning shift,
/// cycling through the four collection types.
pub fn rotation(
    start: NaiveDate,
    today: NaiveDate,
    waste_type: Option<CollectionType>,
) -> Result<RotationWeek, CalendarError> {
    ensure_not_past(start, today)?;

    let week_number = week_number(start);
    let shift = RotationShift::of_week(week_number);
    let slots = (0..7)
        .filter_map(|index| {
            let (kind, hour) = shift.slot(index);
            let date = start + Duration::days(index as i64);
            Some(RotationSlot {
                date,
                waste_type: kind,
                window: CollectionWindow::at(NaiveTime::from_hms_opt(hour, 0, 0)?),
            })
        })
        .filter(|slot| waste_type.map_or(true, |waste_type| slot.waste_type == waste_type))
        .collect();

    Ok(RotationWeek {
        week_number,
        shift,
        slots,
    })
}
