//! Event types.
//!
//! Events are plain values. Attendee counts are display-only: nothing here
//! enforces `attendees <= max_attendees`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Categories an organizer can file an event under.
pub const CATEGORIES: &[&str] = &[
    "Technology",
    "Business",
    "Arts",
    "Fitness",
    "Education",
    "Social",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub attendees: u32,
    pub max_attendees: Option<u32>,
    pub category: Option<String>,
    /// Display name of the organizer
    pub organizer: String,
    pub status: EventStatus,
    pub custom_fields: Vec<CustomField>,
}

/// Extra data collected from attendees at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Select,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Cancelled,
    Completed,
    Draft,
}

impl Event {
    /// Percentage of capacity taken, or None when the event has no limit.
    pub fn attendance_percentage(&self) -> Option<f64> {
        match self.max_attendees {
            Some(0) | None => None,
            Some(max) => Some(f64::from(self.attendees) / f64::from(max) * 100.0),
        }
    }

    /// Seats left before capacity is reached. None when unlimited.
    pub fn spots_remaining(&self) -> Option<u32> {
        self.max_attendees
            .map(|max| max.saturating_sub(self.attendees))
    }

    pub fn is_full(&self) -> bool {
        self.spots_remaining() == Some(0)
    }

    /// Time as shown on event cards, e.g. "09:00 AM"
    pub fn display_time(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }

    /// Path of the public event page, relative to the site root.
    pub fn share_path(&self) -> String {
        format!("events/{}", self.id)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl CustomField {
    pub fn requirement_label(&self) -> &'static str {
        if self.required { "Required" } else { "Optional" }
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "email" => Ok(FieldType::Email),
            "number" => Ok(FieldType::Number),
            "select" => Ok(FieldType::Select),
            other => Err(format!(
                "Unknown field type '{}'. Expected text, email, number or select",
                other
            )),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
        };
        f.write_str(name)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventStatus::Active => "active",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
            EventStatus::Draft => "draft",
        };
        f.write_str(name)
    }
}
