use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::domain::{Event, RaceRating, RunnerStatistics};

/// Headline numbers for the statistics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub total_participants: usize,
}

/// Events with no parseable date never count as upcoming.
pub fn event_stats(events: &[Event], participant_count: usize, now: DateTime<Utc>) -> EventStats {
    let upcoming = events
        .iter()
        .filter(|e| e.event_date.map_or(false, |d| d >= now))
        .count();
    EventStats {
        total_events: events.len(),
        upcoming_events: upcoming,
        total_participants: participant_count,
    }
}

/// Distance tab on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceFilter {
    #[default]
    All,
    FiveK,
    TenK,
    Half,
    Marathon,
}

impl FromStr for DistanceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(DistanceFilter::All),
            "5k" => Ok(DistanceFilter::FiveK),
            "10k" => Ok(DistanceFilter::TenK),
            "half" => Ok(DistanceFilter::Half),
            "marathon" => Ok(DistanceFilter::Marathon),
            _ => Err(format!("unknown distance filter: {s}")),
        }
    }
}

impl DistanceFilter {
    fn best_time(&self, stat: &RunnerStatistics) -> Option<u32> {
        match self {
            DistanceFilter::All => None,
            DistanceFilter::FiveK => stat.best_5k_time,
            DistanceFilter::TenK => stat.best_10k_time,
            DistanceFilter::Half => stat.best_half_marathon_time,
            DistanceFilter::Marathon => stat.best_marathon_time,
        }
    }
}

/// Top runners for one season: filter by year, require a best time when a
/// specific distance tab is selected, order by ranking points descending
/// (stable), and cap at `limit`.
pub fn leaderboard(
    stats: &[RunnerStatistics],
    year: i32,
    distance: DistanceFilter,
    limit: usize,
) -> Vec<RunnerStatistics> {
    let mut rows: Vec<RunnerStatistics> = stats
        .iter()
        .filter(|s| s.year == year)
        .filter(|s| distance == DistanceFilter::All || distance.best_time(s).is_some())
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.ranking_points.cmp(&a.ranking_points));
    rows.truncate(limit);
    rows
}

/// Mean of the overall `rating` across all reviews of an event; `None`
/// when nobody has rated it yet.
pub fn average_rating(ratings: &[RaceRating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(sum) / ratings.len() as f64)
}

/// The current user's own review, if they have left one.
pub fn user_rating(ratings: &[RaceRating], user_id: Uuid) -> Option<&RaceRating> {
    ratings.iter().find(|r| r.user_id == user_id)
}

/// Renders a best time the way the site shows interval columns:
/// "-" when absent, "M:SS" under an hour, "H:MM:SS" otherwise.
pub fn format_best_time(seconds: Option<u32>) -> String {
    match seconds {
        None => "-".to_string(),
        Some(total) => {
            let hours = total / 3600;
            let minutes = (total % 3600) / 60;
            let secs = total % 60;
            if hours > 0 {
                format!("{hours}:{minutes:02}:{secs:02}")
            } else {
                format!("{minutes}:{secs:02}")
            }
        }
    }
}
