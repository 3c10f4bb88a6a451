use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One running/sporting event listing. `event_date` is `None` when the
/// backend row carried a missing or unparseable date; date-based filter
/// predicates then fail for that event instead of panicking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub event_date: Option<DateTime<Utc>>,
    pub location: String,
    pub county: County,
    pub distance_category: DistanceCategory,
    pub distance_km: f64,
    pub difficulty_level: DifficultyLevel,
    pub terrain_type: TerrainType,
    pub entry_fee: f64,
    pub is_free: bool,
    pub organizer: String,
    pub max_participants: Option<u32>,
    pub current_participants: u32,
    pub registration_open: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub sport_type: Option<SportType>,
    pub created_at: DateTime<Utc>,
}

/// Norwegian administrative regions used by the event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    Oslo,
    Viken,
    Innlandet,
    #[serde(rename = "Vestfold og Telemark")]
    VestfoldOgTelemark,
    Agder,
    Rogaland,
    Vestland,
    #[serde(rename = "Møre og Romsdal")]
    MoreOgRomsdal,
    #[serde(rename = "Trøndelag")]
    Trondelag,
    Nordland,
    #[serde(rename = "Troms og Finnmark")]
    TromsOgFinnmark,
}

impl County {
    pub const ALL: [County; 11] = [
        County::Oslo,
        County::Viken,
        County::Innlandet,
        County::VestfoldOgTelemark,
        County::Agder,
        County::Rogaland,
        County::Vestland,
        County::MoreOgRomsdal,
        County::Trondelag,
        County::Nordland,
        County::TromsOgFinnmark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            County::Oslo => "Oslo",
            County::Viken => "Viken",
            County::Innlandet => "Innlandet",
            County::VestfoldOgTelemark => "Vestfold og Telemark",
            County::Agder => "Agder",
            County::Rogaland => "Rogaland",
            County::Vestland => "Vestland",
            County::MoreOgRomsdal => "Møre og Romsdal",
            County::Trondelag => "Trøndelag",
            County::Nordland => "Nordland",
            County::TromsOgFinnmark => "Troms og Finnmark",
        }
    }
}

impl fmt::Display for County {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for County {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        County::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown county: {s}"))
    }
}

/// Race distance buckets as displayed on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceCategory {
    #[serde(rename = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    TenK,
    #[serde(rename = "Half Marathon")]
    HalfMarathon,
    Marathon,
    Ultra,
}

impl DistanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceCategory::FiveK => "5K",
            DistanceCategory::TenK => "10K",
            DistanceCategory::HalfMarathon => "Half Marathon",
            DistanceCategory::Marathon => "Marathon",
            DistanceCategory::Ultra => "Ultra",
        }
    }
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "5k" => Ok(DistanceCategory::FiveK),
            "10k" => Ok(DistanceCategory::TenK),
            "half marathon" | "half" | "21k" => Ok(DistanceCategory::HalfMarathon),
            "marathon" | "42k" => Ok(DistanceCategory::Marathon),
            "ultra" => Ok(DistanceCategory::Ultra),
            _ => Err(format!("unknown distance category: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Road,
    Trail,
    Track,
    Mixed,
}

impl FromStr for TerrainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "road" => Ok(TerrainType::Road),
            "trail" => Ok(TerrainType::Trail),
            "track" => Ok(TerrainType::Track),
            "mixed" => Ok(TerrainType::Mixed),
            _ => Err(format!("unknown terrain type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    Moderate,
    Hard,
    Extreme,
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "moderate" => Ok(DifficultyLevel::Moderate),
            "hard" => Ok(DifficultyLevel::Hard),
            "extreme" => Ok(DifficultyLevel::Extreme),
            _ => Err(format!("unknown difficulty level: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    Running,
    Ultra,
    CrossCountry,
    Cycling,
    Orienteering,
    Multisport,
}

impl FromStr for SportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "running" => Ok(SportType::Running),
            "ultra" => Ok(SportType::Ultra),
            "cross_country" => Ok(SportType::CrossCountry),
            "cycling" => Ok(SportType::Cycling),
            "orienteering" => Ok(SportType::Orienteering),
            "multisport" => Ok(SportType::Multisport),
            _ => Err(format!("unknown sport type: {s}")),
        }
    }
}

/// Status values carried by the backend's `registrations` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Interested,
    Registered,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Interested => "interested",
            RegistrationStatus::Registered => "registered",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub full_name: String,
    pub home_county: Option<County>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: DifficultyLevel,
    pub duration_weeks: u32,
    pub goal_distance: Option<DistanceCategory>,
    pub created_at: DateTime<Utc>,
}

/// Per-runner season totals and bests. Best times are whole seconds; the
/// backend stores them as interval strings and the wire layer parses them
/// once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerStatistics {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub year: i32,
    pub total_races: u32,
    pub total_distance_km: f64,
    pub best_5k_time: Option<u32>,
    pub best_10k_time: Option<u32>,
    pub best_half_marathon_time: Option<u32>,
    pub best_marathon_time: Option<u32>,
    pub ranking_points: u32,
    pub age_category: Option<String>,
    pub full_name: Option<String>,
    pub home_county: Option<County>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub body: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

/// One runner's review of a held race. The overall `rating` drives the
/// average shown on the event page; the aspect ratings and review text are
/// optional. `reviewer_name` carries the profiles join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceRating {
    pub id: Option<Uuid>,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub organization_rating: Option<u8>,
    pub course_rating: Option<u8>,
    pub atmosphere_rating: Option<u8>,
    pub value_rating: Option<u8>,
    pub review_text: Option<String>,
    pub would_recommend: bool,
    pub created_at: DateTime<Utc>,
    pub reviewer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u32,
    pub author_id: Uuid,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What a comment is attached to; the backend's `comments` table keys on
/// (`content_type`, `content_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Event,
    BlogPost,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Event => "event",
            ContentType::BlogPost => "blog_post",
        }
    }
}

/// A top-level comment (replies carry `parent_comment_id`; the site only
/// lists top-level ones).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Option<Uuid>,
    pub content_type: ContentType,
    pub content_id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
}
