//! Searching, filtering and sorting event lists.
//!
//! A query never touches the events it is given; it returns a new list of
//! references in display order.

use std::cmp::Ordering;
use std::fmt;

use crate::event::Event;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Self {
        if s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => event.category.as_deref() == Some(category.as_str()),
        }
    }
}

/// Display order for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Earliest date first
    #[default]
    Date,
    /// A to Z
    Title,
    /// Most attendees first
    Attendees,
    /// Keep the incoming order
    Unsorted,
}

impl SortKey {
    /// Parse a sort key. Unknown keys keep the incoming order.
    pub fn parse(s: &str) -> Self {
        match s {
            "date" => SortKey::Date,
            "title" => SortKey::Title,
            "attendees" => SortKey::Attendees,
            _ => SortKey::Unsorted,
        }
    }

    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Title => compare_titles(&a.title, &b.title),
            SortKey::Attendees => b.attendees.cmp(&a.attendees),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Attendees => "attendees",
            SortKey::Unsorted => "none",
        };
        f.write_str(name)
    }
}

/// Case-insensitive first so "art" sorts next to "Art".
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl EventQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter, sort: SortKey) -> Self {
        EventQuery {
            search: search.into(),
            category,
            sort,
        }
    }

    /// Search term matches title, description or location (case-insensitive)
    /// and the category filter accepts the event.
    pub fn matches(&self, event: &Event) -> bool {
        self.matches_search(event) && self.category.matches(event)
    }

    fn matches_search(&self, event: &Event) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        [&event.title, &event.description, &event.location]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    /// Filter then sort. Equal keys keep their incoming order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        let mut matching: Vec<&Event> = events.iter().filter(|e| self.matches(e)).collect();
        matching.sort_by(|a, b| self.sort.compare(a, b));
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn search_team_finds_workshop() {
        let events = sample::events();
        let query = EventQuery::new("team", CategoryFilter::All, SortKey::Date);

        assert_eq!(titles(&query.apply(&events)), vec!["Team Building Workshop"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_location() {
        let events = sample::events();
        let query = EventQuery::new("CENTRAL PARK", CategoryFilter::All, SortKey::Date);

        assert_eq!(titles(&query.apply(&events)), vec!["Fitness Bootcamp"]);
    }

    #[test]
    fn search_covers_description() {
        let events = sample::events();
        let query = EventQuery::new("contemporary", CategoryFilter::All, SortKey::Date);

        assert_eq!(titles(&query.apply(&events)), vec!["Art Exhibition Opening"]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let events = sample::events();
        let query = EventQuery::default();

        assert_eq!(query.apply(&events).len(), events.len());
    }

    #[test]
    fn search_and_category_are_both_required() {
        let events = sample::events();
        let query = EventQuery::new(
            "team",
            CategoryFilter::Only("Technology".to_string()),
            SortKey::Date,
        );

        assert!(query.apply(&events).is_empty());
    }

    #[test]
    fn category_filter_is_exact() {
        let events = sample::events();
        let query = EventQuery::new("", CategoryFilter::parse("Arts"), SortKey::Date);
        assert_eq!(titles(&query.apply(&events)), vec!["Art Exhibition Opening"]);

        let query = EventQuery::new("", CategoryFilter::parse("arts"), SortKey::Date);
        assert!(query.apply(&events).is_empty());
    }

    #[test]
    fn all_category_equals_no_category_filter() {
        let events = sample::events();

        for search in ["", "a", "con", "workshop", "zzz"] {
            let all = EventQuery::new(search, CategoryFilter::parse("All"), SortKey::Unsorted);
            let unfiltered: Vec<&Event> = events
                .iter()
                .filter(|e| EventQuery::new(search, CategoryFilter::All, SortKey::Unsorted).matches_search(e))
                .collect();

            assert_eq!(all.apply(&events), unfiltered, "search {:?}", search);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let events = sample::events();
        let query = EventQuery::new("e", CategoryFilter::All, SortKey::Title);

        let once: Vec<Event> = query.apply(&events).into_iter().cloned().collect();
        let twice: Vec<Event> = query.apply(&once).into_iter().cloned().collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn sort_by_date_is_non_decreasing() {
        let mut events = sample::events();
        events.reverse();
        let sorted = EventQuery::new("", CategoryFilter::All, SortKey::Date).apply(&events);

        assert!(sorted.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn sort_by_attendees_is_non_increasing() {
        let events = sample::events();
        let sorted = EventQuery::new("", CategoryFilter::All, SortKey::Attendees).apply(&events);

        assert!(sorted.windows(2).all(|w| w[0].attendees >= w[1].attendees));
        assert_eq!(sorted[0].title, "Art Exhibition Opening");
    }

    #[test]
    fn sort_by_title_ascending() {
        let events = sample::events();
        let sorted = EventQuery::new("", CategoryFilter::All, SortKey::Title).apply(&events);

        assert_eq!(
            titles(&sorted),
            vec![
                "Art Exhibition Opening",
                "Fitness Bootcamp",
                "Team Building Workshop",
                "Tech Conference 2024",
            ]
        );
    }

    #[test]
    fn ties_keep_incoming_order() {
        let mut events = sample::events();
        for event in &mut events {
            event.attendees = 10;
        }
        let sorted = EventQuery::new("", CategoryFilter::All, SortKey::Attendees).apply(&events);

        let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn unknown_sort_key_keeps_order() {
        assert_eq!(SortKey::parse("popularity"), SortKey::Unsorted);

        let mut events = sample::events();
        events.swap(0, 3);
        let sorted = EventQuery::new("", CategoryFilter::All, SortKey::parse("??")).apply(&events);

        let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn input_is_not_mutated() {
        let events = sample::events();
        let before = events.clone();
        let _ = EventQuery::new("", CategoryFilter::All, SortKey::Title).apply(&events);

        assert_eq!(events, before);
    }
}
