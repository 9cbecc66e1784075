//! Integration tests: auth provider profile sync
//!
//! Exercises the profile cache the webhook maintains and its effect on the
//! annotated post listing. Needs TEST_DATABASE_URL; skips cleanly
//! otherwise.

use blog_service::db::user_repo;
use blog_service::services::PostService;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

async fn setup_test_db() -> Option<Pool<Postgres>> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    Some(pool)
}

fn unique_user(prefix: &str) -> String {
    format!("{}_{}", prefix, rand::random::<u64>())
}

#[tokio::test]
async fn upsert_is_idempotent_per_user_id() {
    let Some(pool) = setup_test_db().await else {
        return;
    };

    let user = unique_user("user_sync");

    user_repo::upsert_profile(&pool, &user, Some("Ada"), Some("Lovelace"))
        .await
        .expect("first upsert");
    let updated = user_repo::upsert_profile(&pool, &user, Some("Ada"), Some("Byron"))
        .await
        .expect("second upsert");

    assert_eq!(updated.last_name.as_deref(), Some("Byron"));

    let found = user_repo::find_profile(&pool, &user)
        .await
        .expect("lookup")
        .expect("profile present");
    assert_eq!(found.first_name.as_deref(), Some("Ada"));
    assert_eq!(found.last_name.as_deref(), Some("Byron"));

    assert!(user_repo::delete_profile(&pool, &user).await.expect("delete"));
    assert!(user_repo::find_profile(&pool, &user)
        .await
        .expect("lookup after delete")
        .is_none());
}

#[tokio::test]
async fn listing_annotates_posts_with_the_cached_display_name() {
    let Some(pool) = setup_test_db().await else {
        return;
    };

    let user = unique_user("user_named");
    user_repo::upsert_profile(&pool, &user, Some("Grace"), Some("Hopper"))
        .await
        .expect("upsert profile");

    let posts = PostService::new(pool.clone());
    let post = posts
        .create_post(Some(&user), "Compilers", "Flow-Matic notes", None)
        .await
        .expect("create post");

    let listed = posts.list_posts().await.expect("list posts");
    let mine = listed
        .iter()
        .find(|p| p.id == post.id)
        .expect("created post listed");

    assert_eq!(mine.author_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(mine.favorite_count, 0);
}
