//! Organizer dashboard statistics.

use serde::Serialize;

use crate::event::{Event, EventStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_attendees: u64,
    pub active_events: usize,
}

impl DashboardStats {
    pub fn from_events(events: &[Event]) -> Self {
        DashboardStats {
            total_events: events.len(),
            total_attendees: events.iter().map(|e| u64::from(e.attendees)).sum(),
            active_events: events
                .iter()
                .filter(|e| e.status == EventStatus::Active)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn stats_over_sample_events() {
        let stats = DashboardStats::from_events(&sample::events());

        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.total_attendees, 45 + 12 + 78 + 35);
        assert_eq!(stats.active_events, 4);
    }

    #[test]
    fn inactive_events_are_not_active() {
        let mut events = sample::events();
        events[0].status = EventStatus::Cancelled;
        events[1].status = EventStatus::Draft;

        let stats = DashboardStats::from_events(&events);
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.active_events, 2);
    }

    #[test]
    fn empty_dashboard() {
        assert_eq!(DashboardStats::from_events(&[]), DashboardStats::default());
    }
}
