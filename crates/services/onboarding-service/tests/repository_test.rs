//! Repository tests against an in-memory SQLite database.

use std::time::Duration;

use common::{AppError, DatabaseConfig};
use domain::{Component, Configuration, Partition, ProfileStep, ProfileUpdate};
use onboarding_service_lib::infra::Database;
use onboarding_service_lib::repository::{
    ConfigRepository, ConfigStore, UserRepository, UserStore,
};
use onboarding_service_lib::service::{ServiceContainer, Services};
use uuid::Uuid;

async fn setup() -> Database {
    // One connection: every pooled connection would otherwise get its own memory database
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Database::connect(&config).await.expect("in-memory database")
}

#[tokio::test]
async fn test_first_read_seeds_default() {
    let db = setup().await;
    let store = ConfigStore::new(db.get_connection());

    let config = store.get_or_seed(Configuration::seed()).await.unwrap();

    assert_eq!(config.partition, Partition::default());
    assert_eq!(config.version, 1);
}

#[tokio::test]
async fn test_concurrent_first_reads_agree() {
    let db = setup().await;
    let services = Services::from_connection(db.get_connection());
    let config = services.config();

    let (a, b) = futures::join!(config.get_configuration(), config.get_configuration());
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a, b);
}

#[tokio::test]
async fn test_replace_bumps_version() {
    let db = setup().await;
    let store = ConfigStore::new(db.get_connection());
    let proposed = Partition::new(
        vec![Component::Birthdate],
        vec![Component::AboutMe, Component::Address],
    );

    let first = store.replace(proposed.clone()).await.unwrap();
    let second = store.replace(Partition::default()).await.unwrap();

    assert_eq!(first.partition, proposed);
    assert_eq!(first.version, 2);
    assert_eq!(second.partition, Partition::default());
    assert_eq!(second.version, 3);

    let read = store.get_or_seed(Configuration::seed()).await.unwrap();
    assert_eq!(read, second);
}

#[tokio::test]
async fn test_concurrent_replaces_return_own_write() {
    let db = setup().await;
    let store = ConfigStore::new(db.get_connection());
    store.get_or_seed(Configuration::seed()).await.unwrap();

    let first = Partition::new(
        vec![Component::AboutMe, Component::Address],
        vec![Component::Birthdate],
    );
    let second = Partition::new(
        vec![Component::Birthdate],
        vec![Component::AboutMe, Component::Address],
    );

    let (a, b) = futures::join!(store.replace(first.clone()), store.replace(second.clone()));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.partition, first);
    assert_eq!(b.partition, second);
    let mut versions = vec![a.version, b.version];
    versions.sort();
    assert_eq!(versions, vec![2, 3]);
}

#[tokio::test]
async fn test_reregistration_keeps_progress() {
    let db = setup().await;
    let services = Services::from_connection(db.get_connection());
    let onboarding = services.onboarding();

    let user = onboarding
        .register("a@example.com".to_string(), "first".to_string())
        .await
        .unwrap();
    let session = domain::SessionContext::for_user(user.id);
    onboarding
        .submit_profile_data(
            session,
            ProfileStep::Second,
            ProfileUpdate {
                about_me: Some("hello".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let again = onboarding
        .register("a@example.com".to_string(), "second".to_string())
        .await
        .unwrap();

    assert_eq!(again.id, user.id);
    assert_ne!(again.password_hash, user.password_hash);
    assert_eq!(again.step_completed(), 2);
    assert_eq!(again.profile.about_me.as_deref(), Some("hello"));
    assert_eq!(onboarding.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_profile_round_trip_through_store() {
    let db = setup().await;
    let services = Services::from_connection(db.get_connection());
    let onboarding = services.onboarding();

    let user = onboarding
        .register("b@example.com".to_string(), "pw".to_string())
        .await
        .unwrap();
    let saved = onboarding
        .submit_profile_data(
            domain::SessionContext::for_user(user.id),
            ProfileStep::Third,
            ProfileUpdate {
                street: Some("1 Main St".to_string()),
                city: Some("Springfield".to_string()),
                region: Some("IL".to_string()),
                postal_code: Some("62704".to_string()),
                birthdate: Some("1990-04-01".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(saved.step_completed(), 3);

    let current = onboarding
        .current_user(domain::SessionContext::for_user(user.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.profile.postal_code.as_deref(), Some("62704"));
    assert_eq!(
        current.profile.birthdate,
        chrono::NaiveDate::from_ymd_opt(1990, 4, 1)
    );
}

#[tokio::test]
async fn test_list_newest_first() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());

    store
        .upsert_credentials("old@example.com".to_string(), "h1".to_string())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    store
        .upsert_credentials("new@example.com".to_string(), "h2".to_string())
        .await
        .unwrap();

    let users = store.list().await.unwrap();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();

    assert_eq!(emails, vec!["new@example.com", "old@example.com"]);
}

#[tokio::test]
async fn test_save_profile_for_missing_user() {
    let db = setup().await;
    let store = UserStore::new(db.get_connection());
    let ghost = domain::User::new(Uuid::new_v4(), "ghost@example.com".to_string(), "h".to_string());

    let result = store.save_profile(&ghost).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_ping() {
    let db = setup().await;
    assert!(db.ping().await.is_ok());
}
