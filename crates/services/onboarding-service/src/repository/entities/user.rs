//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{DomainError, OnboardingState, ProfileFields, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub about_me: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub birthdate: Option<Date>,
    /// Highest onboarding step completed (1-3)
    pub step_completed: i16,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            profile: ProfileFields {
                about_me: model.about_me,
                street: model.street,
                city: model.city,
                region: model.region,
                postal_code: model.postal_code,
                birthdate: model.birthdate,
            },
            progress: OnboardingState::try_from(model.step_completed)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
