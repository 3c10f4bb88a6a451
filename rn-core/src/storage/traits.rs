use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::Result;
use crate::domain::*;

/// Storage boundary over the hosted backend (or an in-memory stand-in).
/// Implementations own all I/O; the pure engine never touches this.
#[async_trait]
pub trait Storage: Send + Sync {
    // Event operations
    async fn create_event(&self, event: &mut Event) -> Result<()>;
    async fn get_event_by_id(&self, event_id: Uuid) -> Result<Option<Event>>;
    /// All events ordered by event date ascending; undated events sort last.
    async fn get_all_events(&self) -> Result<Vec<Event>>;

    // Favorites
    async fn get_favorites(&self, user_id: Uuid) -> Result<HashSet<Uuid>>;
    async fn add_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()>;
    async fn remove_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()>;

    // Registrations (interested/registered)
    async fn get_registrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Uuid, RegistrationStatus)>>;
    async fn upsert_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<()>;
    async fn delete_registration(&self, user_id: Uuid, event_id: Uuid) -> Result<()>;
    async fn count_registrations(&self) -> Result<usize>;

    // Profiles
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>>;

    // Race ratings
    /// All reviews of one event, newest first.
    async fn get_race_ratings(&self, event_id: Uuid) -> Result<Vec<RaceRating>>;
    /// One review per (event, user): replaces any existing review by the
    /// same user for the same event.
    async fn upsert_race_rating(&self, rating: &mut RaceRating) -> Result<()>;

    // Blog posts
    /// Published posts, newest first.
    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>>;
    async fn create_blog_post(&self, post: &mut BlogPost) -> Result<()>;
    async fn delete_blog_post(&self, post_id: Uuid) -> Result<()>;

    // Comments
    /// Top-level comments on one piece of content, newest first.
    async fn get_comments(
        &self,
        content_type: ContentType,
        content_id: Uuid,
    ) -> Result<Vec<Comment>>;
    async fn add_comment(&self, comment: &mut Comment) -> Result<()>;

    // Training programs
    async fn get_training_programs(
        &self,
        difficulty: Option<DifficultyLevel>,
    ) -> Result<Vec<TrainingProgram>>;

    // Runner statistics
    async fn get_runner_statistics(&self, year: i32) -> Result<Vec<RunnerStatistics>>;

    // Articles
    async fn get_articles(&self) -> Result<Vec<Article>>;
    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>>;
}
