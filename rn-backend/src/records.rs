use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use rn_core::domain::*;

/// Raw `events` row as PostgREST returns it. Categorical columns arrive as
/// strings and dates as ISO text; `into_domain` validates them once here so
/// the engine only ever sees typed values.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: Option<String>,
    #[serde(default)]
    pub location: String,
    pub county: String,
    pub distance_category: String,
    #[serde(default)]
    pub distance_km: f64,
    pub difficulty_level: String,
    pub terrain_type: String,
    #[serde(default)]
    pub entry_fee: f64,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub organizer: String,
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub registration_open: bool,
    pub registration_deadline: Option<String>,
    pub image_url: Option<String>,
    pub sport_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Accepts RFC 3339 timestamps or bare dates; anything else is `None`.
fn parse_event_date(raw: Option<&str>, context: &str) -> Option<DateTime<Utc>> {
    let raw = raw?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0)?,
            Utc,
        ));
    }
    warn!("Unparseable event date {:?} on {}", raw, context);
    None
}

impl EventRow {
    /// Validates the row into a typed `Event`. Unknown categorical values
    /// reject the whole row (`None`); a bad date only degrades that field.
    pub fn into_domain(self) -> Option<Event> {
        let county: County = match self.county.parse() {
            Ok(c) => c,
            Err(e) => {
                warn!("Skipping event {:?}: {}", self.title, e);
                return None;
            }
        };
        let distance_category: DistanceCategory = match self.distance_category.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping event {:?}: {}", self.title, e);
                return None;
            }
        };
        let difficulty_level: DifficultyLevel = match self.difficulty_level.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping event {:?}: {}", self.title, e);
                return None;
            }
        };
        let terrain_type: TerrainType = match self.terrain_type.parse() {
            Ok(t) => t,
            Err(e) => {
                warn!("Skipping event {:?}: {}", self.title, e);
                return None;
            }
        };
        // Absent or unknown sport type is a valid "unspecified".
        let sport_type = self
            .sport_type
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<SportType>().ok());

        let event_date = parse_event_date(self.event_date.as_deref(), &self.title);
        let registration_deadline =
            parse_event_date(self.registration_deadline.as_deref(), &self.title);

        Some(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            event_date,
            location: self.location,
            county,
            distance_category,
            distance_km: self.distance_km,
            difficulty_level,
            terrain_type,
            entry_fee: self.entry_fee,
            is_free: self.is_free,
            organizer: self.organizer,
            max_participants: self.max_participants,
            current_participants: self.current_participants,
            registration_open: self.registration_open,
            registration_deadline,
            image_url: self.image_url,
            sport_type,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRow {
    pub event_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRow {
    pub event_id: Uuid,
    pub registration_status: String,
}

impl RegistrationRow {
    pub fn into_domain(self) -> Option<(Uuid, RegistrationStatus)> {
        match self.registration_status.as_str() {
            "interested" => Some((self.event_id, RegistrationStatus::Interested)),
            "registered" => Some((self.event_id, RegistrationStatus::Registered)),
            other => {
                warn!("Skipping registration with unknown status {:?}", other);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainingProgramRow {
    pub id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub difficulty_level: String,
    pub duration_weeks: u32,
    pub goal_distance: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TrainingProgramRow {
    pub fn into_domain(self) -> Option<TrainingProgram> {
        let difficulty_level: DifficultyLevel = match self.difficulty_level.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!("Skipping training program {:?}: {}", self.title, e);
                return None;
            }
        };
        let goal_distance = self
            .goal_distance
            .as_deref()
            .and_then(|s| s.parse::<DistanceCategory>().ok());
        Some(TrainingProgram {
            id: self.id,
            title: self.title,
            description: self.description,
            difficulty_level,
            duration_weeks: self.duration_weeks,
            goal_distance,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRef {
    pub full_name: Option<String>,
    pub home_county: Option<String>,
}

/// `runner_statistics` row with the embedded `profiles` join the site
/// selects. Best times arrive as interval strings ("HH:MM:SS").
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerStatisticsRow {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub year: i32,
    #[serde(default)]
    pub total_races: u32,
    #[serde(default)]
    pub total_distance_km: f64,
    pub best_5k_time: Option<String>,
    pub best_10k_time: Option<String>,
    pub best_half_marathon_time: Option<String>,
    pub best_marathon_time: Option<String>,
    #[serde(default)]
    pub ranking_points: u32,
    pub age_category: Option<String>,
    pub profiles: Option<ProfileRef>,
}

/// Interval text to whole seconds; malformed intervals degrade to `None`.
fn parse_interval_seconds(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    let time = NaiveTime::parse_from_str(raw, "%H:%M:%S").ok()?;
    use chrono::Timelike;
    Some(time.num_seconds_from_midnight())
}

impl RunnerStatisticsRow {
    pub fn into_domain(self) -> RunnerStatistics {
        let (full_name, home_county) = match self.profiles {
            Some(profile) => (
                profile.full_name,
                profile
                    .home_county
                    .as_deref()
                    .and_then(|c| c.parse::<County>().ok()),
            ),
            None => (None, None),
        };
        RunnerStatistics {
            id: self.id,
            user_id: self.user_id,
            year: self.year,
            total_races: self.total_races,
            total_distance_km: self.total_distance_km,
            best_5k_time: parse_interval_seconds(self.best_5k_time.as_deref()),
            best_10k_time: parse_interval_seconds(self.best_10k_time.as_deref()),
            best_half_marathon_time: parse_interval_seconds(
                self.best_half_marathon_time.as_deref(),
            ),
            best_marathon_time: parse_interval_seconds(self.best_marathon_time.as_deref()),
            ranking_points: self.ranking_points,
            age_category: self.age_category,
            full_name,
            home_county,
        }
    }
}

/// `profiles` row for the current user's own profile page.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    #[serde(default)]
    pub full_name: String,
    pub home_county: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl ProfileRow {
    pub fn into_domain(self) -> Profile {
        let home_county = self
            .home_county
            .as_deref()
            .and_then(|c| c.parse::<County>().ok());
        Profile {
            id: self.id,
            user_id: self.user_id,
            full_name: self.full_name,
            home_county,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// `race_ratings` row with the embedded profiles join.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceRatingRow {
    pub id: Option<Uuid>,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub organization_rating: Option<u8>,
    pub course_rating: Option<u8>,
    pub atmosphere_rating: Option<u8>,
    pub value_rating: Option<u8>,
    pub review_text: Option<String>,
    #[serde(default)]
    pub would_recommend: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub profiles: Option<ProfileRef>,
}

impl RaceRatingRow {
    pub fn into_domain(self) -> RaceRating {
        RaceRating {
            id: self.id,
            event_id: self.event_id,
            user_id: self.user_id,
            rating: self.rating,
            organization_rating: self.organization_rating,
            course_rating: self.course_rating,
            atmosphere_rating: self.atmosphere_rating,
            value_rating: self.value_rating,
            review_text: self.review_text,
            would_recommend: self.would_recommend,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            reviewer_name: self.profiles.and_then(|p| p.full_name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostRow {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: u32,
    pub author_id: Uuid,
    pub created_at: Option<DateTime<Utc>>,
    pub profiles: Option<ProfileRef>,
}

impl BlogPostRow {
    pub fn into_domain(self) -> BlogPost {
        BlogPost {
            id: self.id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            tags: self.tags.unwrap_or_default(),
            published: self.published,
            published_at: self.published_at,
            view_count: self.view_count,
            author_id: self.author_id,
            author_name: self.profiles.and_then(|p| p.full_name),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// `comments` row; unknown content types are skipped like any other
/// unknown categorical.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRow {
    pub id: Option<Uuid>,
    pub content_type: String,
    pub content_id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub parent_comment_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub profiles: Option<ProfileRef>,
}

impl CommentRow {
    pub fn into_domain(self) -> Option<Comment> {
        let content_type = match self.content_type.as_str() {
            "article" => ContentType::Article,
            "event" => ContentType::Event,
            "blog_post" => ContentType::BlogPost,
            other => {
                warn!("Skipping comment with unknown content type {:?}", other);
                return None;
            }
        };
        Some(Comment {
            id: self.id,
            content_type,
            content_id: self.content_id,
            user_id: self.user_id,
            comment_text: self.comment_text,
            parent_comment_id: self.parent_comment_id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            author_name: self.profiles.and_then(|p| p.full_name),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRow {
    pub id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleRow {
    pub fn into_domain(self) -> Article {
        Article {
            id: self.id,
            title: self.title,
            slug: self.slug,
            summary: self.summary,
            body: self.body,
            author: self.author,
            published_at: self.published_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_row_json() -> serde_json::Value {
        json!({
            "id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "title": "Trondheim Halvmaraton",
            "description": "Langs Nidelva",
            "event_date": "2025-09-06T10:00:00+00:00",
            "location": "Trondheim",
            "county": "Trøndelag",
            "distance_category": "Half Marathon",
            "distance_km": 21.1,
            "difficulty_level": "moderate",
            "terrain_type": "road",
            "entry_fee": 450.0,
            "is_free": false,
            "organizer": "Trondheim Løpeklubb",
            "max_participants": 3000,
            "current_participants": 1250,
            "registration_open": true,
            "registration_deadline": null,
            "image_url": null,
            "sport_type": "running",
            "created_at": "2025-01-15T08:30:00Z"
        })
    }

    #[test]
    fn well_formed_row_becomes_a_typed_event() {
        let row: EventRow = serde_json::from_value(event_row_json()).unwrap();
        let event = row.into_domain().unwrap();
        assert_eq!(event.county, County::Trondelag);
        assert_eq!(event.distance_category, DistanceCategory::HalfMarathon);
        assert_eq!(event.terrain_type, TerrainType::Road);
        assert_eq!(event.sport_type, Some(SportType::Running));
        assert!(event.event_date.is_some());
    }

    #[test]
    fn bad_date_degrades_the_field_but_keeps_the_event() {
        let mut raw = event_row_json();
        raw["event_date"] = json!("neste lørdag");
        let row: EventRow = serde_json::from_value(raw).unwrap();
        let event = row.into_domain().unwrap();
        assert!(event.event_date.is_none());
    }

    #[test]
    fn bare_date_strings_are_accepted() {
        let mut raw = event_row_json();
        raw["event_date"] = json!("2025-09-06");
        let row: EventRow = serde_json::from_value(raw).unwrap();
        assert!(row.into_domain().unwrap().event_date.is_some());
    }

    #[test]
    fn unknown_county_rejects_the_row() {
        let mut raw = event_row_json();
        raw["county"] = json!("Atlantis");
        let row: EventRow = serde_json::from_value(raw).unwrap();
        assert!(row.into_domain().is_none());
    }

    #[test]
    fn empty_sport_type_means_unspecified() {
        let mut raw = event_row_json();
        raw["sport_type"] = json!("");
        let row: EventRow = serde_json::from_value(raw).unwrap();
        assert_eq!(row.into_domain().unwrap().sport_type, None);
    }

    #[test]
    fn interval_strings_parse_to_seconds() {
        assert_eq!(parse_interval_seconds(Some("00:19:05")), Some(19 * 60 + 5));
        assert_eq!(
            parse_interval_seconds(Some("03:01:02")),
            Some(3 * 3600 + 62)
        );
        assert_eq!(parse_interval_seconds(Some("fort")), None);
        assert_eq!(parse_interval_seconds(None), None);
    }

    #[test]
    fn training_program_row_parses_and_degraded_rows_are_skipped() {
        let row: TrainingProgramRow = serde_json::from_value(json!({
            "id": null,
            "title": "Nybegynner 10K",
            "description": "12 uker mot første 10-kilometer",
            "difficulty_level": "easy",
            "duration_weeks": 12,
            "goal_distance": "10K",
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        let program = row.clone().into_domain().unwrap();
        assert_eq!(program.difficulty_level, DifficultyLevel::Easy);
        assert_eq!(program.goal_distance, Some(DistanceCategory::TenK));

        let mut bad = row;
        bad.difficulty_level = "impossible".to_string();
        assert!(bad.into_domain().is_none());
    }

    #[test]
    fn runner_statistics_row_carries_the_profile_join() {
        let row: RunnerStatisticsRow = serde_json::from_value(json!({
            "id": null,
            "user_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "year": 2025,
            "total_races": 14,
            "total_distance_km": 310.5,
            "best_5k_time": "00:19:05",
            "best_10k_time": null,
            "best_half_marathon_time": "01:29:30",
            "best_marathon_time": "ugyldig",
            "ranking_points": 820,
            "age_category": "M40-44",
            "profiles": { "full_name": "Kari Nordmann", "home_county": "Trøndelag" }
        }))
        .unwrap();
        let stat = row.into_domain();
        assert_eq!(stat.full_name.as_deref(), Some("Kari Nordmann"));
        assert_eq!(stat.home_county, Some(County::Trondelag));
        assert_eq!(stat.best_5k_time, Some(19 * 60 + 5));
        assert_eq!(stat.best_half_marathon_time, Some(89 * 60 + 30));
        // Malformed interval degrades that field only.
        assert_eq!(stat.best_marathon_time, None);
    }

    #[test]
    fn runner_statistics_row_without_profile_join_still_converts() {
        let row: RunnerStatisticsRow = serde_json::from_value(json!({
            "id": null,
            "user_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "year": 2024,
            "best_5k_time": null,
            "best_10k_time": null,
            "best_half_marathon_time": null,
            "best_marathon_time": null,
            "age_category": null,
            "profiles": null
        }))
        .unwrap();
        let stat = row.into_domain();
        assert_eq!(stat.full_name, None);
        assert_eq!(stat.home_county, None);
        assert_eq!(stat.ranking_points, 0);
    }

    #[test]
    fn profile_row_degrades_an_unknown_home_county() {
        let row: ProfileRow = serde_json::from_value(json!({
            "id": null,
            "user_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "full_name": "Ola Nordmann",
            "home_county": "Atlantis",
            "created_at": null
        }))
        .unwrap();
        let profile = row.into_domain();
        assert_eq!(profile.full_name, "Ola Nordmann");
        assert_eq!(profile.home_county, None);
    }

    #[test]
    fn race_rating_row_keeps_aspect_ratings_and_reviewer() {
        let row: RaceRatingRow = serde_json::from_value(json!({
            "id": null,
            "event_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "user_id": "0e2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "rating": 5,
            "organization_rating": 4,
            "course_rating": null,
            "atmosphere_rating": 5,
            "value_rating": 3,
            "review_text": "Rask løype, god stemning",
            "would_recommend": true,
            "created_at": "2025-09-21T12:00:00Z",
            "profiles": { "full_name": "Kari Nordmann", "home_county": null }
        }))
        .unwrap();
        let rating = row.into_domain();
        assert_eq!(rating.rating, 5);
        assert_eq!(rating.course_rating, None);
        assert_eq!(rating.reviewer_name.as_deref(), Some("Kari Nordmann"));
        assert!(rating.would_recommend);
    }

    #[test]
    fn blog_post_row_defaults_missing_tags() {
        let row: BlogPostRow = serde_json::from_value(json!({
            "id": null,
            "title": "Intervaller om vinteren",
            "slug": "intervaller-om-vinteren",
            "content": "Piggsko eller mølle?",
            "excerpt": null,
            "tags": null,
            "published": true,
            "published_at": "2025-02-01T08:00:00Z",
            "view_count": 42,
            "author_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "created_at": null,
            "profiles": { "full_name": "Ola Nordmann", "home_county": null }
        }))
        .unwrap();
        let post = row.into_domain();
        assert!(post.tags.is_empty());
        assert!(post.published);
        assert_eq!(post.author_name.as_deref(), Some("Ola Nordmann"));
    }

    #[test]
    fn unknown_comment_content_type_is_skipped() {
        let row: CommentRow = serde_json::from_value(json!({
            "id": null,
            "content_type": "podcast",
            "content_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "user_id": "0e2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "comment_text": "Bra episode",
            "parent_comment_id": null,
            "created_at": null,
            "profiles": null
        }))
        .unwrap();
        assert!(row.into_domain().is_none());

        let row: CommentRow = serde_json::from_value(json!({
            "id": null,
            "content_type": "article",
            "content_id": "5f2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "user_id": "0e2d89a1-7f52-4b6e-9a39-67b2f6f1f4f6",
            "comment_text": "Nyttig!",
            "parent_comment_id": null,
            "created_at": null,
            "profiles": { "full_name": "Kari Nordmann", "home_county": null }
        }))
        .unwrap();
        let comment = row.into_domain().unwrap();
        assert_eq!(comment.content_type, ContentType::Article);
        assert_eq!(comment.author_name.as_deref(), Some("Kari Nordmann"));
    }

    #[test]
    fn unknown_registration_status_is_skipped() {
        let row = RegistrationRow {
            event_id: Uuid::new_v4(),
            registration_status: "waitlisted".to_string(),
        };
        assert!(row.into_domain().is_none());
    }
}
