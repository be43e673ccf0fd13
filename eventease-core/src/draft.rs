//! New-event drafts.
//!
//! An `EventDraft` holds the raw text of the creation form. Nothing is
//! submitted until `into_event` has validated every field.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::{EventEaseError, EventEaseResult};
use crate::event::{CATEGORIES, CustomField, Event, EventStatus, FieldType};
use crate::user::User;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";

const TIME_FORMATS: &[&str] = &["%H:%M", "%I:%M %p", "%I:%M%p", "%H:%M:%S"];

/// A custom field while the draft is being edited. `id` only identifies it
/// for removal.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftField {
    pub id: u64,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM (24h) or HH:MM AM/PM
    pub time: String,
    pub location: String,
    pub max_attendees: String,
    pub category: String,
    custom_fields: Vec<DraftField>,
    next_field_id: u64,
}

impl EventDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom_fields(&self) -> &[DraftField] {
        &self.custom_fields
    }

    /// Add a custom field. Blank labels are ignored; returns the new field's id.
    pub fn add_custom_field(
        &mut self,
        label: &str,
        field_type: FieldType,
        required: bool,
    ) -> Option<u64> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        self.next_field_id += 1;
        let id = self.next_field_id;
        self.custom_fields.push(DraftField {
            id,
            label: label.to_string(),
            field_type,
            required,
        });
        Some(id)
    }

    pub fn remove_custom_field(&mut self, id: u64) {
        self.custom_fields.retain(|field| field.id != id);
    }

    /// Check the draft without consuming it.
    pub fn validate(&self) -> EventEaseResult<()> {
        self.parse().map(|_| ())
    }

    /// Validate and build the event, organized by `organizer`.
    pub fn into_event(self, organizer: &User) -> EventEaseResult<Event> {
        let parsed = self.parse()?;

        Ok(Event {
            id: Uuid::new_v4().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: parsed.date,
            time: parsed.time,
            location: self.location.trim().to_string(),
            attendees: 0,
            max_attendees: parsed.max_attendees,
            category: parsed.category,
            organizer: organizer.name.clone(),
            status: EventStatus::Active,
            custom_fields: self
                .custom_fields
                .into_iter()
                .map(|field| CustomField {
                    label: field.label,
                    field_type: field.field_type,
                    required: field.required,
                })
                .collect(),
        })
    }

    fn parse(&self) -> EventEaseResult<ParsedDraft> {
        let required = [
            &self.title,
            &self.description,
            &self.date,
            &self.time,
            &self.location,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(EventEaseError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        Ok(ParsedDraft {
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            max_attendees: parse_max_attendees(&self.max_attendees)?,
            category: parse_category(&self.category)?,
        })
    }
}

struct ParsedDraft {
    date: NaiveDate,
    time: NaiveTime,
    max_attendees: Option<u32>,
    category: Option<String>,
}

fn parse_date(s: &str) -> EventEaseResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        EventEaseError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", s.trim()))
    })
}

fn parse_time(s: &str) -> EventEaseResult<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
        .ok_or_else(|| {
            EventEaseError::Validation(format!("Invalid time '{}'. Expected HH:MM or HH:MM AM/PM", s))
        })
}

fn parse_max_attendees(s: &str) -> EventEaseResult<Option<u32>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    match s.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => Err(EventEaseError::Validation(format!(
            "Invalid maximum attendees '{}'. Expected a number of at least 1",
            s
        ))),
    }
}

fn parse_category(s: &str) -> EventEaseResult<Option<String>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(s))
        .map(|c| Some(c.to_string()))
        .ok_or_else(|| {
            EventEaseError::Validation(format!(
                "Unknown category '{}'. Available: {}",
                s,
                CATEGORIES.join(", ")
            ))
        })
}
