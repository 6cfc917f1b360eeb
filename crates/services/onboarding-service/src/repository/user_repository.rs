//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{OnboardingState, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address (exact match)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user at step 1, or replace the credential hash of the user
    /// already holding this email (progress and profile are kept).
    async fn upsert_credentials(&self, email: String, password_hash: String) -> AppResult<User>;

    /// Persist profile fields and progress of an existing user
    async fn save_profile(&self, user: &User) -> AppResult<User>;

    /// List all users, newest first
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_domain(model: user::Model) -> AppResult<User> {
    User::try_from(model).map_err(AppError::from)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        result.map(to_domain).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        result.map(to_domain).transpose()
    }

    async fn upsert_credentials(&self, email: String, password_hash: String) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            about_me: Set(None),
            street: Set(None),
            city: Set(None),
            region: Set(None),
            postal_code: Set(None),
            birthdate: Set(None),
            step_completed: Set(i16::from(OnboardingState::Registered.step_completed())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        UserEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::Email)
                    .update_columns([user::Column::PasswordHash, user::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::internal("User missing after registration"))
    }

    async fn save_profile(&self, user: &User) -> AppResult<User> {
        let profile = &user.profile;
        let active = ActiveModel {
            id: Unchanged(user.id),
            about_me: Set(profile.about_me.clone()),
            street: Set(profile.street.clone()),
            city: Set(profile.city.clone()),
            region: Set(profile.region.clone()),
            postal_code: Set(profile.postal_code.clone()),
            birthdate: Set(profile.birthdate),
            step_completed: Set(i16::from(user.step_completed())),
            updated_at: Set(user.updated_at),
            ..Default::default()
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::not_found("User"),
            other => AppError::from(other),
        })?;

        to_domain(model)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(to_domain).collect()
    }
}
