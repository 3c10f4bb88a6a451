use anyhow::Result;
use chrono::{Duration, Utc};
use rn_core::stats::average_rating;
use rn_core::storage::{InMemoryStorage, Storage};
use rn_core::{
    Article, BlogPost, Comment, ContentType, County, DifficultyLevel, DistanceCategory, Profile,
    RaceRating, RunnerStatistics, TrainingProgram,
};
use uuid::Uuid;

fn program(title: &str, difficulty_level: DifficultyLevel) -> TrainingProgram {
    TrainingProgram {
        id: Some(Uuid::new_v4()),
        title: title.to_string(),
        description: None,
        difficulty_level,
        duration_weeks: 12,
        goal_distance: Some(DistanceCategory::TenK),
        created_at: Utc::now(),
    }
}

fn article(title: &str, slug: &str, days_ago: i64) -> Article {
    Article {
        id: Some(Uuid::new_v4()),
        title: title.to_string(),
        slug: slug.to_string(),
        summary: String::new(),
        body: String::new(),
        author: "Redaksjonen".to_string(),
        published_at: Utc::now() - Duration::days(days_ago),
    }
}

fn statistics(user_id: Uuid, year: i32, ranking_points: u32) -> RunnerStatistics {
    RunnerStatistics {
        id: Some(Uuid::new_v4()),
        user_id,
        year,
        total_races: 10,
        total_distance_km: 200.0,
        best_5k_time: Some(20 * 60),
        best_10k_time: None,
        best_half_marathon_time: None,
        best_marathon_time: None,
        ranking_points,
        age_category: None,
        full_name: Some("Kari Nordmann".to_string()),
        home_county: Some(County::Oslo),
    }
}

fn rating(event_id: Uuid, user_id: Uuid, score: u8) -> RaceRating {
    RaceRating {
        id: None,
        event_id,
        user_id,
        rating: score,
        organization_rating: None,
        course_rating: None,
        atmosphere_rating: None,
        value_rating: None,
        review_text: None,
        would_recommend: true,
        created_at: Utc::now(),
        reviewer_name: None,
    }
}

fn blog_post(title: &str, published: bool, days_ago: i64) -> BlogPost {
    BlogPost {
        id: None,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        content: String::new(),
        excerpt: None,
        tags: vec!["trening".to_string()],
        published,
        published_at: published.then(Utc::now),
        view_count: 0,
        author_id: Uuid::new_v4(),
        author_name: None,
        created_at: Utc::now() - Duration::days(days_ago),
    }
}

fn comment(content_type: ContentType, content_id: Uuid, text: &str) -> Comment {
    Comment {
        id: None,
        content_type,
        content_id,
        user_id: Uuid::new_v4(),
        comment_text: text.to_string(),
        parent_comment_id: None,
        created_at: Utc::now(),
        author_name: Some("Ola Nordmann".to_string()),
    }
}

#[tokio::test]
async fn training_programs_filter_by_difficulty() -> Result<()> {
    let storage = InMemoryStorage::new();
    storage.seed_programs(vec![
        program("Nybegynner 10K", DifficultyLevel::Easy),
        program("Maratonoppkjøring", DifficultyLevel::Hard),
    ]);

    let all = storage.get_training_programs(None).await?;
    assert_eq!(all.len(), 2);

    let easy = storage
        .get_training_programs(Some(DifficultyLevel::Easy))
        .await?;
    assert_eq!(easy.len(), 1);
    assert_eq!(easy[0].title, "Nybegynner 10K");
    Ok(())
}

#[tokio::test]
async fn runner_statistics_are_scoped_to_the_year() -> Result<()> {
    let runner = Uuid::new_v4();
    let storage = InMemoryStorage::new();
    storage.seed_statistics(vec![
        statistics(runner, 2025, 800),
        statistics(runner, 2024, 650),
    ]);

    let rows = storage.get_runner_statistics(2025).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ranking_points, 800);
    Ok(())
}

#[tokio::test]
async fn articles_come_newest_first_and_resolve_by_slug() -> Result<()> {
    let storage = InMemoryStorage::new();
    storage.seed_articles(vec![
        article("Slik velger du løpesko", "lopesko", 30),
        article("Intervaller for nybegynnere", "intervaller", 2),
    ]);

    let all = storage.get_articles().await?;
    assert_eq!(all[0].slug, "intervaller");
    assert_eq!(all[1].slug, "lopesko");

    let found = storage.get_article_by_slug("lopesko").await?;
    assert_eq!(found.map(|a| a.title), Some("Slik velger du løpesko".to_string()));
    assert!(storage.get_article_by_slug("finnes-ikke").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn profile_lookup_matches_on_user_id() -> Result<()> {
    let user_id = Uuid::new_v4();
    let storage = InMemoryStorage::new();
    storage.seed_profiles(vec![Profile {
        id: Some(Uuid::new_v4()),
        user_id,
        full_name: "Kari Nordmann".to_string(),
        home_county: Some(County::Vestland),
        created_at: Utc::now(),
    }]);

    let profile = storage.get_profile(user_id).await?;
    assert_eq!(profile.map(|p| p.full_name), Some("Kari Nordmann".to_string()));
    assert!(storage.get_profile(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn second_rating_from_the_same_runner_replaces_the_first() -> Result<()> {
    let event_id = Uuid::new_v4();
    let runner = Uuid::new_v4();
    let storage = InMemoryStorage::new();

    let mut first = rating(event_id, runner, 3);
    storage.upsert_race_rating(&mut first).await?;
    let assigned_id = first.id;
    assert!(assigned_id.is_some());

    let mut revised = rating(event_id, runner, 5);
    revised.review_text = Some("Bedre enn i fjor".to_string());
    storage.upsert_race_rating(&mut revised).await?;
    assert_eq!(revised.id, assigned_id);

    let mut other = rating(event_id, Uuid::new_v4(), 4);
    storage.upsert_race_rating(&mut other).await?;

    let ratings = storage.get_race_ratings(event_id).await?;
    assert_eq!(ratings.len(), 2);
    assert_eq!(average_rating(&ratings), Some(4.5));
    Ok(())
}

#[tokio::test]
async fn ratings_are_scoped_to_their_event() -> Result<()> {
    let event_id = Uuid::new_v4();
    let storage = InMemoryStorage::new();
    storage
        .upsert_race_rating(&mut rating(event_id, Uuid::new_v4(), 5))
        .await?;
    storage
        .upsert_race_rating(&mut rating(Uuid::new_v4(), Uuid::new_v4(), 1))
        .await?;

    let ratings = storage.get_race_ratings(event_id).await?;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].rating, 5);
    Ok(())
}

#[tokio::test]
async fn blog_listing_shows_published_posts_newest_first() -> Result<()> {
    let storage = InMemoryStorage::new();
    storage
        .create_blog_post(&mut blog_post("Vinterlauping i Tromso", true, 10))
        .await?;
    storage
        .create_blog_post(&mut blog_post("Upublisert kladd", false, 0))
        .await?;
    let mut latest = blog_post("Sesongens terrenglop", true, 1);
    storage.create_blog_post(&mut latest).await?;

    let posts = storage.get_blog_posts().await?;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Sesongens terrenglop");

    let latest_id = latest.id.ok_or_else(|| anyhow::anyhow!("missing id"))?;
    storage.delete_blog_post(latest_id).await?;
    let posts = storage.get_blog_posts().await?;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Vinterlauping i Tromso");
    Ok(())
}

#[tokio::test]
async fn comment_listing_is_top_level_for_one_piece_of_content() -> Result<()> {
    let article_id = Uuid::new_v4();
    let storage = InMemoryStorage::new();

    let mut top = comment(ContentType::Article, article_id, "Nyttig artikkel");
    storage.add_comment(&mut top).await?;

    let mut reply = comment(ContentType::Article, article_id, "Enig!");
    reply.parent_comment_id = top.id;
    storage.add_comment(&mut reply).await?;

    storage
        .add_comment(&mut comment(ContentType::Event, article_id, "Feil tråd"))
        .await?;

    let comments = storage.get_comments(ContentType::Article, article_id).await?;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment_text, "Nyttig artikkel");
    Ok(())
}
