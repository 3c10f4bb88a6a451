use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::traits::Storage;
use crate::common::error::Result;
use crate::domain::*;

/// In-memory storage for tests and the CLI's file-backed mode.
pub struct InMemoryStorage {
    events: Arc<Mutex<Vec<Event>>>,
    favorites: Arc<Mutex<HashMap<Uuid, HashSet<Uuid>>>>,
    registrations: Arc<Mutex<HashMap<(Uuid, Uuid), RegistrationStatus>>>,
    profiles: Arc<Mutex<Vec<Profile>>>,
    ratings: Arc<Mutex<Vec<RaceRating>>>,
    blog_posts: Arc<Mutex<Vec<BlogPost>>>,
    comments: Arc<Mutex<Vec<Comment>>>,
    programs: Arc<Mutex<Vec<TrainingProgram>>>,
    statistics: Arc<Mutex<Vec<RunnerStatistics>>>,
    articles: Arc<Mutex<Vec<Article>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            favorites: Arc::new(Mutex::new(HashMap::new())),
            registrations: Arc::new(Mutex::new(HashMap::new())),
            profiles: Arc::new(Mutex::new(Vec::new())),
            ratings: Arc::new(Mutex::new(Vec::new())),
            blog_posts: Arc::new(Mutex::new(Vec::new())),
            comments: Arc::new(Mutex::new(Vec::new())),
            programs: Arc::new(Mutex::new(Vec::new())),
            statistics: Arc::new(Mutex::new(Vec::new())),
            articles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seeds the event collection wholesale, assigning IDs where missing.
    pub fn with_events(events: Vec<Event>) -> Self {
        let storage = Self::new();
        {
            let mut stored = storage.events.lock().unwrap();
            for mut event in events {
                if event.id.is_none() {
                    event.id = Some(Uuid::new_v4());
                }
                stored.push(event);
            }
        }
        storage
    }

    pub fn seed_profiles(&self, profiles: Vec<Profile>) {
        *self.profiles.lock().unwrap() = profiles;
    }

    pub fn seed_programs(&self, programs: Vec<TrainingProgram>) {
        *self.programs.lock().unwrap() = programs;
    }

    pub fn seed_statistics(&self, statistics: Vec<RunnerStatistics>) {
        *self.statistics.lock().unwrap() = statistics;
    }

    pub fn seed_articles(&self, articles: Vec<Article>) {
        *self.articles.lock().unwrap() = articles;
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_event(&self, event: &mut Event) -> Result<()> {
        let id = Uuid::new_v4();
        event.id = Some(id);

        let mut events = self.events.lock().unwrap();
        events.push(event.clone());

        debug!("Created event: {} with id {}", event.title, id);
        Ok(())
    }

    async fn get_event_by_id(&self, event_id: Uuid) -> Result<Option<Event>> {
        let events = self.events.lock().unwrap();
        Ok(events.iter().find(|e| e.id == Some(event_id)).cloned())
    }

    async fn get_all_events(&self) -> Result<Vec<Event>> {
        let events = self.events.lock().unwrap();
        let mut all_events = events.clone();
        // Undated events sort last, mirroring the backend's ordering.
        all_events.sort_by_key(|e| (e.event_date.is_none(), e.event_date));
        Ok(all_events)
    }

    async fn get_favorites(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites.get(&user_id).cloned().unwrap_or_default())
    }

    async fn add_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        let mut favorites = self.favorites.lock().unwrap();
        favorites.entry(user_id).or_default().insert(event_id);
        debug!("Added favorite {} for user {}", event_id, user_id);
        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        let mut favorites = self.favorites.lock().unwrap();
        if let Some(set) = favorites.get_mut(&user_id) {
            set.remove(&event_id);
        }
        debug!("Removed favorite {} for user {}", event_id, user_id);
        Ok(())
    }

    async fn get_registrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Uuid, RegistrationStatus)>> {
        let registrations = self.registrations.lock().unwrap();
        Ok(registrations
            .iter()
            .filter(|((uid, _), _)| *uid == user_id)
            .map(|((_, event_id), status)| (*event_id, *status))
            .collect())
    }

    async fn upsert_registration(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: RegistrationStatus,
    ) -> Result<()> {
        let mut registrations = self.registrations.lock().unwrap();
        registrations.insert((user_id, event_id), status);
        debug!(
            "Upserted registration {} for user {} as {}",
            event_id,
            user_id,
            status.as_str()
        );
        Ok(())
    }

    async fn delete_registration(&self, user_id: Uuid, event_id: Uuid) -> Result<()> {
        let mut registrations = self.registrations.lock().unwrap();
        registrations.remove(&(user_id, event_id));
        debug!("Deleted registration {} for user {}", event_id, user_id);
        Ok(())
    }

    async fn count_registrations(&self) -> Result<usize> {
        let registrations = self.registrations.lock().unwrap();
        Ok(registrations.len())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn get_race_ratings(&self, event_id: Uuid) -> Result<Vec<RaceRating>> {
        let ratings = self.ratings.lock().unwrap();
        let mut rows: Vec<RaceRating> = ratings
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn upsert_race_rating(&self, rating: &mut RaceRating) -> Result<()> {
        let mut ratings = self.ratings.lock().unwrap();
        if let Some(existing) = ratings
            .iter_mut()
            .find(|r| r.event_id == rating.event_id && r.user_id == rating.user_id)
        {
            rating.id = existing.id;
            *existing = rating.clone();
            debug!(
                "Updated rating for event {} by user {}",
                rating.event_id, rating.user_id
            );
            return Ok(());
        }

        if rating.id.is_none() {
            rating.id = Some(Uuid::new_v4());
        }
        ratings.push(rating.clone());
        debug!(
            "Created rating for event {} by user {}",
            rating.event_id, rating.user_id
        );
        Ok(())
    }

    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let posts = self.blog_posts.lock().unwrap();
        let mut published: Vec<BlogPost> =
            posts.iter().filter(|p| p.published).cloned().collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(published)
    }

    async fn create_blog_post(&self, post: &mut BlogPost) -> Result<()> {
        let id = Uuid::new_v4();
        post.id = Some(id);

        let mut posts = self.blog_posts.lock().unwrap();
        posts.push(post.clone());

        debug!("Created blog post: {} with id {}", post.title, id);
        Ok(())
    }

    async fn delete_blog_post(&self, post_id: Uuid) -> Result<()> {
        let mut posts = self.blog_posts.lock().unwrap();
        posts.retain(|p| p.id != Some(post_id));
        debug!("Deleted blog post {}", post_id);
        Ok(())
    }

    async fn get_comments(
        &self,
        content_type: ContentType,
        content_id: Uuid,
    ) -> Result<Vec<Comment>> {
        let comments = self.comments.lock().unwrap();
        let mut rows: Vec<Comment> = comments
            .iter()
            .filter(|c| {
                c.content_type == content_type
                    && c.content_id == content_id
                    && c.parent_comment_id.is_none()
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn add_comment(&self, comment: &mut Comment) -> Result<()> {
        let id = Uuid::new_v4();
        comment.id = Some(id);

        let mut comments = self.comments.lock().unwrap();
        comments.push(comment.clone());

        debug!("Created comment {} on {}", id, comment.content_type.as_str());
        Ok(())
    }

    async fn get_training_programs(
        &self,
        difficulty: Option<DifficultyLevel>,
    ) -> Result<Vec<TrainingProgram>> {
        let programs = self.programs.lock().unwrap();
        Ok(programs
            .iter()
            .filter(|p| difficulty.map_or(true, |d| p.difficulty_level == d))
            .cloned()
            .collect())
    }

    async fn get_runner_statistics(&self, year: i32) -> Result<Vec<RunnerStatistics>> {
        let statistics = self.statistics.lock().unwrap();
        Ok(statistics.iter().filter(|s| s.year == year).cloned().collect())
    }

    async fn get_articles(&self) -> Result<Vec<Article>> {
        let articles = self.articles.lock().unwrap();
        let mut all = articles.clone();
        all.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(all)
    }

    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        let articles = self.articles.lock().unwrap();
        Ok(articles.iter().find(|a| a.slug == slug).cloned())
    }
}
