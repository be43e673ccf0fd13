//! Built-in sample events.
//!
//! There is no event backend yet; every listing is served from this data.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{EventEaseError, EventEaseResult};
use crate::event::{CustomField, Event, EventStatus, FieldType};
use crate::user::User;

/// Ids of the sample events shown on every organizer's dashboard.
const DASHBOARD_EVENT_IDS: &[&str] = &["1", "2"];

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    description: &str,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
    location: &str,
    attendees: u32,
    max_attendees: u32,
    category: &str,
    organizer: &str,
) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
        location: location.to_string(),
        attendees,
        max_attendees: Some(max_attendees),
        category: Some(category.to_string()),
        organizer: organizer.to_string(),
        status: EventStatus::Active,
        custom_fields: Vec::new(),
    }
}

fn optional_text(label: &str) -> CustomField {
    CustomField {
        label: label.to_string(),
        field_type: FieldType::Text,
        required: false,
    }
}

/// All sample events, in their natural listing order.
pub fn events() -> Vec<Event> {
    let mut conference = event(
        "1",
        "Tech Conference 2024",
        "Join us for the biggest tech conference of the year featuring industry leaders and cutting-edge innovations.",
        (2024, 12, 15),
        (9, 0),
        "Convention Center, Downtown",
        45,
        100,
        "Technology",
        "Tech Events Inc.",
    );
    conference.custom_fields = vec![
        optional_text("Company"),
        optional_text("Job Title"),
        optional_text("Dietary Restrictions"),
    ];

    vec![
        conference,
        event(
            "2",
            "Team Building Workshop",
            "Enhance team collaboration and communication through interactive workshops and activities.",
            (2024, 12, 20),
            (14, 0),
            "Office HQ, Business District",
            12,
            25,
            "Business",
            "People Ops",
        ),
        event(
            "3",
            "Art Exhibition Opening",
            "Experience the latest contemporary art from local and international artists.",
            (2024, 12, 25),
            (18, 0),
            "Modern Art Gallery",
            78,
            150,
            "Arts",
            "Modern Art Gallery",
        ),
        event(
            "4",
            "Fitness Bootcamp",
            "Get fit with our intensive fitness bootcamp designed for all skill levels.",
            (2024, 12, 30),
            (7, 0),
            "Central Park",
            35,
            50,
            "Fitness",
            "City Fitness Club",
        ),
    ]
}

pub fn find(id: &str) -> EventEaseResult<Event> {
    events()
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| EventEaseError::EventNotFound(id.to_string()))
}

/// Events managed by `user` on the dashboard.
///
/// Sample data has no real ownership, so every organizer is shown the same
/// events under their own name.
pub fn owned_events(user: &User) -> Vec<Event> {
    events()
        .into_iter()
        .filter(|e| DASHBOARD_EVENT_IDS.contains(&e.id.as_str()))
        .map(|mut e| {
            e.organizer = user.name.clone();
            e
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;
    use chrono::Utc;

    #[test]
    fn sample_ids_are_unique() {
        let events = events();
        let mut ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), events.len());
    }

    #[test]
    fn sample_attendance_within_capacity() {
        assert!(events()
            .iter()
            .all(|e| e.max_attendees.is_some_and(|max| e.attendees <= max)));
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("3").unwrap().title, "Art Exhibition Opening");
        assert!(matches!(find("99"), Err(EventEaseError::EventNotFound(_))));
    }

    #[test]
    fn owned_events_take_user_name() {
        let user = User {
            id: "1".to_string(),
            email: "alice@example.com".to_string(),
            name: "alice".to_string(),
            role: UserRole::EventOwner,
            created_at: Utc::now(),
        };

        let owned = owned_events(&user);
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|e| e.organizer == "alice"));
    }
}
