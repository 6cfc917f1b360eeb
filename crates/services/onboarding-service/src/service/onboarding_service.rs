//! Onboarding service - drives a user from registration through steps 2 and 3.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Password, ProfileStep, ProfileUpdate, SessionContext, User};

use super::ConfigService;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Onboarding service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OnboardingService: Send + Sync {
    /// Step 1: create the user, or reset the credentials of an existing one.
    async fn register(&self, email: String, password: String) -> AppResult<User>;

    /// Steps 2 and 3: merge profile fields and advance progress.
    async fn submit_profile_data(
        &self,
        session: SessionContext,
        step: ProfileStep,
        update: ProfileUpdate,
    ) -> AppResult<User>;

    /// User behind the session, if it resolves to one
    async fn current_user(&self, session: SessionContext) -> AppResult<Option<User>>;

    /// All users, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of OnboardingService.
pub struct OnboardingManager {
    users: Arc<dyn UserRepository>,
    config: Arc<dyn ConfigService>,
}

impl OnboardingManager {
    /// Create new onboarding service instance
    pub fn new(users: Arc<dyn UserRepository>, config: Arc<dyn ConfigService>) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl OnboardingService for OnboardingManager {
    async fn register(&self, email: String, password: String) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();

        let user = self.users.upsert_credentials(email, password_hash).await?;
        info!(
            user_id = %user.id,
            step_completed = user.step_completed(),
            "User registered"
        );

        Ok(user)
    }

    async fn submit_profile_data(
        &self,
        session: SessionContext,
        step: ProfileStep,
        update: ProfileUpdate,
    ) -> AppResult<User> {
        let user_id = session.user_id().ok_or(AppError::AuthenticationRequired)?;
        let mut user = self.users.find_by_id(user_id).await?.ok_or_not_found("User")?;

        let configuration = self.config.get_configuration().await?;
        update.check_scope(&configuration.partition, step)?;

        user.submit_profile(step, update)?;
        let saved = self.users.save_profile(&user).await?;
        info!(
            user_id = %saved.id,
            step = step.number(),
            step_completed = saved.step_completed(),
            "Profile step submitted"
        );

        Ok(saved)
    }

    async fn current_user(&self, session: SessionContext) -> AppResult<Option<User>> {
        match session.user_id() {
            Some(id) => self.users.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use crate::service::MockConfigService;
    use domain::{Configuration, OnboardingState, Partition};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn user_at(id: Uuid, progress: OnboardingState) -> User {
        let mut user = User::new(id, "test@example.com".to_string(), "hashed".to_string());
        user.progress = progress;
        user
    }

    fn default_config() -> MockConfigService {
        let mut config = MockConfigService::new();
        config
            .expect_get_configuration()
            .returning(|| Ok(Configuration::seed()));
        config
    }

    fn about_me(text: &str) -> ProfileUpdate {
        ProfileUpdate {
            about_me: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_upsert_credentials()
            .withf(|email, hash| {
                email == "new@example.com" && Password::from_hash(hash.clone()).verify("pw")
            })
            .times(1)
            .returning(|email, hash| Ok(User::new(Uuid::new_v4(), email, hash)));

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(MockConfigService::new()));
        let user = service
            .register("new@example.com".to_string(), "pw".to_string())
            .await
            .unwrap();

        assert_eq!(user.step_completed(), 1);
    }

    #[tokio::test]
    async fn test_register_returns_existing_progress() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_upsert_credentials()
            .returning(move |_, _| Ok(user_at(id, OnboardingState::ProfilePartial)));

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(MockConfigService::new()));
        let user = service
            .register("test@example.com".to_string(), "again".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.step_completed(), 2);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_upsert_credentials().never();

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(MockConfigService::new()));
        let result = service.register("a@example.com".to_string(), String::new()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_without_session_requires_authentication() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(MockConfigService::new()));
        let result = service
            .submit_profile_data(SessionContext::anonymous(), ProfileStep::Second, about_me("x"))
            .await;

        assert!(matches!(result, Err(AppError::AuthenticationRequired)));
    }

    #[tokio::test]
    async fn test_submit_for_vanished_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save_profile().never();

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(default_config()));
        let result = service
            .submit_profile_data(
                SessionContext::for_user(Uuid::new_v4()),
                ProfileStep::Second,
                about_me("x"),
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_step2_after_step3_keeps_progress_at_3() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |id| Ok(Some(user_at(id, OnboardingState::ProfileComplete))));
        repo.expect_save_profile()
            .withf(|user| user.progress == OnboardingState::ProfileComplete)
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(default_config()));
        let user = service
            .submit_profile_data(SessionContext::for_user(id), ProfileStep::Second, about_me("x"))
            .await
            .unwrap();

        assert_eq!(user.step_completed(), 3);
        assert_eq!(user.profile.about_me.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_fields_outside_step_rejected() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user_at(id, OnboardingState::Registered))));
        repo.expect_save_profile().never();

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(default_config()));
        // Default configuration collects the address on step 3
        let result = service
            .submit_profile_data(
                SessionContext::for_user(id),
                ProfileStep::Second,
                ProfileUpdate {
                    street: Some("1 Main St".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_scope_follows_current_configuration() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(user_at(id, OnboardingState::Registered))));
        repo.expect_save_profile()
            .returning(|user| Ok(user.clone()));

        let mut config = MockConfigService::new();
        config.expect_get_configuration().returning(|| {
            let mut configuration = Configuration::seed();
            configuration.partition = Partition::new(
                vec![domain::Component::AboutMe, domain::Component::Address],
                vec![domain::Component::Birthdate],
            );
            Ok(configuration)
        });

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(config));
        let user = service
            .submit_profile_data(
                SessionContext::for_user(id),
                ProfileStep::Second,
                ProfileUpdate {
                    street: Some("1 Main St".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.profile.street.as_deref(), Some("1 Main St"));
        assert_eq!(user.step_completed(), 2);
    }

    #[tokio::test]
    async fn test_current_user_without_session_is_none() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let service = OnboardingManager::new(Arc::new(repo), Arc::new(MockConfigService::new()));
        let user = service.current_user(SessionContext::anonymous()).await.unwrap();

        assert!(user.is_none());
    }
}
