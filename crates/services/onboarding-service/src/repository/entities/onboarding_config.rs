//! Onboarding configuration database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Component, Configuration, DomainError, Partition};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "onboarding_config")]
pub struct Model {
    /// Always `CONFIG_SINGLETON_ID`
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub step2: Json,
    pub step3: Json,
    pub version: i64,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Encode a step's component list for storage
pub fn components_to_json(components: &[Component]) -> Result<Json, DomainError> {
    serde_json::to_value(components)
        .map_err(|e| DomainError::internal(format!("Failed to encode components: {}", e)))
}

fn components_from_json(column: &str, value: Json) -> Result<Vec<Component>, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::internal(format!("Corrupt {} column: {}", column, e)))
}

/// Convert database model to domain configuration
impl TryFrom<Model> for Configuration {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Configuration {
            partition: Partition::new(
                components_from_json("step2", model.step2)?,
                components_from_json("step3", model.step3)?,
            ),
            version: model.version,
            updated_at: model.updated_at,
        })
    }
}
