use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use rn_core::common::error::{Result, RunNorwayError};
use rn_core::domain::*;
use rn_core::storage::Storage;

use crate::client::SupabaseClient;
use crate::records::{
    ArticleRow, BlogPostRow, CommentRow, EventRow, FavoriteRow, ProfileRow, RaceRatingRow,
    RegistrationRow, RunnerStatisticsRow, TrainingProgramRow,
};

/// `Storage` over the hosted backend's REST interface. Rows that fail
/// boundary validation are dropped with a warning rather than failing the
/// whole fetch.
pub struct SupabaseStorage {
    client: SupabaseClient,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SupabaseClient::from_env()?))
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn create_event(&self, event: &mut Event) -> Result<()> {
        if event.id.is_none() {
            event.id = Some(Uuid::new_v4());
        }
        self.client.insert("events", event).await
    }

    async fn get_event_by_id(&self, event_id: Uuid) -> Result<Option<Event>> {
        let id = event_id.to_string();
        let rows: Vec<EventRow> = self
            .client
            .select("events", &[("select", "*"), ("id", &format!("eq.{id}"))])
            .await?;
        Ok(rows.into_iter().next().and_then(EventRow::into_domain))
    }

    async fn get_all_events(&self) -> Result<Vec<Event>> {
        let rows: Vec<EventRow> = self
            .client
            .select(
                "events",
                &[("select", "*"), ("order", "event_date.asc.nullslast")],
            )
            .await?;
        let total = rows.len();
        let events: Vec<Event> = rows.into_iter().filter_map(EventRow::into_domain).collect();
        debug!("Fetched {} events ({} valid)", total, events.len());
        Ok(events)
    }

    async fn get_favorites(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let rows: Vec<FavoriteRow> = self
            .client
            .select(
                "favorites",
                &[
                    ("select", "event_id"),
                    ("user_id", &format!("eq.{user_id}")),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|r| r.event_id).collect())
    }

    async fn add_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        self.client
            .insert(
                "favorites",
                &json!({ "user_id": user_id, "event_id": event_id }),
            )
            .await
    }

    async fn remove_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        self.client
            .delete(
                "favorites",
                &[
                    ("user_id", &format!("eq.{user_id}")),
                    ("event_id", &format!("eq.{event_id}")),
                ],
            )
            .await
    }

    async fn get_registrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Uuid, RegistrationStatus)>> {
        let rows: Vec<RegistrationRow> = self
            .client
            .select(
                "registrations",
                &[
                    ("select", "event_id,registration_status"),
                    ("user_id", &format!("eq.{user_id}")),
                ],
            )
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(RegistrationRow::into_domain)
            .collect())
    }

    async fn upsert_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<()> {
        self.client
            .upsert(
                "registrations",
                &json!({
                    "user_id": user_id,
                    "event_id": event_id,
                    "registration_status": status.as_str(),
                }),
            )
            .await
    }

    async fn delete_registration(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        self.client
            .delete(
                "registrations",
                &[
                    ("user_id", &format!("eq.{user_id}")),
                    ("event_id", &format!("eq.{event_id}")),
                ],
            )
            .await
    }

    async fn count_registrations(&self) -> Result<usize> {
        let rows: Vec<serde_json::Value> = self
            .client
            .select("registrations", &[("select", "id")])
            .await?;
        Ok(rows.len())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(
                "profiles",
                &[("select", "*"), ("user_id", &format!("eq.{user_id}"))],
            )
            .await?;
        Ok(rows.into_iter().next().map(ProfileRow::into_domain))
    }

    async fn get_race_ratings(&self, event_id: Uuid) -> Result<Vec<RaceRating>> {
        let rows: Vec<RaceRatingRow> = self
            .client
            .select(
                "race_ratings",
                &[
                    ("select", "*,profiles:user_id(full_name)"),
                    ("event_id", &format!("eq.{event_id}")),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(RaceRatingRow::into_domain).collect())
    }

    async fn upsert_race_rating(&self, rating: &mut RaceRating) -> Result<()> {
        if rating.id.is_none() {
            rating.id = Some(Uuid::new_v4());
        }
        self.client
            .upsert(
                "race_ratings",
                &json!({
                    "id": rating.id,
                    "event_id": rating.event_id,
                    "user_id": rating.user_id,
                    "rating": rating.rating,
                    "organization_rating": rating.organization_rating,
                    "course_rating": rating.course_rating,
                    "atmosphere_rating": rating.atmosphere_rating,
                    "value_rating": rating.value_rating,
                    "review_text": rating.review_text,
                    "would_recommend": rating.would_recommend,
                }),
            )
            .await
    }

    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let rows: Vec<BlogPostRow> = self
            .client
            .select(
                "blog_posts",
                &[
                    ("select", "*,profiles:author_id(full_name)"),
                    ("published", "eq.true"),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(BlogPostRow::into_domain).collect())
    }

    async fn create_blog_post(&self, post: &mut BlogPost) -> Result<()> {
        if post.id.is_none() {
            post.id = Some(Uuid::new_v4());
        }
        self.client
            .insert(
                "blog_posts",
                &json!({
                    "id": post.id,
                    "title": post.title,
                    "slug": post.slug,
                    "content": post.content,
                    "excerpt": post.excerpt,
                    "tags": post.tags,
                    "published": post.published,
                    "published_at": post.published_at,
                    "author_id": post.author_id,
                }),
            )
            .await
    }

    async fn delete_blog_post(&self, post_id: Uuid) -> Result<()> {
        self.client
            .delete("blog_posts", &[("id", &format!("eq.{post_id}"))])
            .await
    }

    async fn get_comments(
        &self,
        content_type: ContentType,
        content_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = self
            .client
            .select(
                "comments",
                &[
                    ("select", "*,profiles:user_id(full_name)"),
                    ("content_type", &format!("eq.{}", content_type.as_str())),
                    ("content_id", &format!("eq.{content_id}")),
                    ("parent_comment_id", "is.null"),
                    ("order", "created_at.desc"),
                ],
            )
            .await?;
        Ok(rows.into_iter().filter_map(CommentRow::into_domain).collect())
    }

    async fn add_comment(&self, comment: &mut Comment) -> Result<()> {
        if comment.id.is_none() {
            comment.id = Some(Uuid::new_v4());
        }
        self.client
            .insert(
                "comments",
                &json!({
                    "id": comment.id,
                    "content_type": comment.content_type.as_str(),
                    "content_id": comment.content_id,
                    "user_id": comment.user_id,
                    "comment_text": comment.comment_text,
                    "parent_comment_id": comment.parent_comment_id,
                }),
            )
            .await
    }

    async fn get_training_programs(
        &self,
        difficulty: Option<DifficultyLevel>,
    ) -> Result<Vec<TrainingProgram>> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        if let Some(level) = difficulty {
            let level = serde_json::to_value(level).map_err(RunNorwayError::Json)?;
            let level = level.as_str().unwrap_or_default().to_string();
            query.push(("difficulty_level", format!("eq.{level}")));
        }
        let query: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let rows: Vec<TrainingProgramRow> = self.client.select("training_programs", &query).await?;
        Ok(rows
            .into_iter()
            .filter_map(TrainingProgramRow::into_domain)
            .collect())
    }

    async fn get_runner_statistics(&self, year: i32) -> Result<Vec<RunnerStatistics>> {
        let rows: Vec<RunnerStatisticsRow> = self
            .client
            .select(
                "runner_statistics",
                &[
                    ("select", "*,profiles:user_id(full_name,home_county)"),
                    ("year", &format!("eq.{year}")),
                    ("order", "ranking_points.desc"),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(RunnerStatisticsRow::into_domain).collect())
    }

    async fn get_articles(&self) -> Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = self
            .client
            .select(
                "articles",
                &[("select", "*"), ("order", "published_at.desc")],
            )
            .await?;
        Ok(rows.into_iter().map(ArticleRow::into_domain).collect())
    }

    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let rows: Vec<ArticleRow> = self
            .client
            .select(
                "articles",
                &[("select", "*"), ("slug", &format!("eq.{slug}"))],
            )
            .await?;
        Ok(rows.into_iter().next().map(ArticleRow::into_domain))
    }
}
