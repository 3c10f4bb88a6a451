use std::collections::HashSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::{
    County, DifficultyLevel, DistanceCategory, Event, SportType, TerrainType,
};

/// Default upper bound of the price slider on the site.
pub const DEFAULT_MAX_PRICE: f64 = 5000.0;

/// Inclusive entry-fee bounds. Free events pass regardless of the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

/// The caller-owned bundle of active filter predicates.
///
/// Every field has a "no constraint" value (empty string, `None`, empty
/// set, default price range) under which its predicate is vacuously true,
/// so `FilterSpec::default()` matches every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Case-insensitive substring match against title or location.
    pub search: String,
    /// Calendar month, 0-based (0 = January), matching the site's encoding.
    pub month: Option<u32>,
    pub county: Option<County>,
    pub distance_categories: HashSet<DistanceCategory>,
    pub terrain_types: HashSet<TerrainType>,
    pub difficulty_levels: HashSet<DifficultyLevel>,
    pub price_range: PriceRange,
    /// Tri-state: `None` = unconstrained, otherwise strict equality.
    pub registration_open: Option<bool>,
    pub sport_type: Option<SportType>,
}

impl FilterSpec {
    /// True iff the event satisfies all nine predicate categories.
    /// Multi-select sets use OR within the set; an unset field never
    /// excludes anything.
    pub fn matches(&self, event: &Event) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            event.title.to_lowercase().contains(&needle)
                || event.location.to_lowercase().contains(&needle)
        };

        // Events without a parseable date fail any month constraint.
        let matches_month = match self.month {
            None => true,
            Some(month) => event
                .event_date
                .map_or(false, |date| date.month0() == month),
        };

        let matches_county = self.county.map_or(true, |county| event.county == county);

        let matches_distance = self.distance_categories.is_empty()
            || self.distance_categories.contains(&event.distance_category);

        let matches_terrain =
            self.terrain_types.is_empty() || self.terrain_types.contains(&event.terrain_type);

        let matches_difficulty = self.difficulty_levels.is_empty()
            || self.difficulty_levels.contains(&event.difficulty_level);

        let matches_price = event.is_free
            || (event.entry_fee >= self.price_range.min
                && event.entry_fee <= self.price_range.max);

        let matches_registration = self
            .registration_open
            .map_or(true, |open| event.registration_open == open);

        let matches_sport = self
            .sport_type
            .map_or(true, |sport| event.sport_type == Some(sport));

        matches_search
            && matches_month
            && matches_county
            && matches_distance
            && matches_terrain
            && matches_difficulty
            && matches_price
            && matches_registration
            && matches_sport
    }

    /// Number of active constraints, as shown in the filter-panel badge.
    /// Each selected set member counts once; search is not counted.
    pub fn active_filter_count(&self) -> usize {
        let price_active =
            self.price_range.min > 0.0 || self.price_range.max < DEFAULT_MAX_PRICE;

        usize::from(self.month.is_some())
            + usize::from(self.county.is_some())
            + self.distance_categories.len()
            + self.terrain_types.len()
            + self.difficulty_levels.len()
            + usize::from(price_active)
            + usize::from(self.registration_open.is_some())
            + usize::from(self.sport_type.is_some())
    }
}

/// Stable single-pass filter: returns the matching events in their input
/// order, leaving the input untouched. Total over any input and cheap
/// enough to re-run per keystroke.
pub fn filter_events(events: &[Event], spec: &FilterSpec) -> Vec<Event> {
    events
        .iter()
        .filter(|event| spec.matches(event))
        .cloned()
        .collect()
}
