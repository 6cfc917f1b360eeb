//! Onboarding configuration repository (single-row store).

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

use super::entities::onboarding_config::{
    self, components_to_json, ActiveModel, Entity as ConfigEntity,
};
use common::{AppError, AppResult};
use domain::{Configuration, Partition, CONFIG_SINGLETON_ID};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Configuration repository trait for dependency injection.
///
/// There is exactly one configuration row, keyed by [`CONFIG_SINGLETON_ID`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Return the stored configuration, inserting `seed` first if none exists.
    ///
    /// Concurrent first reads produce a single row; every caller observes it.
    async fn get_or_seed(&self, seed: Configuration) -> AppResult<Configuration>;

    /// Overwrite both steps and bump the version
    async fn replace(&self, partition: Partition) -> AppResult<Configuration>;
}

/// Concrete implementation of ConfigRepository
pub struct ConfigStore {
    db: DatabaseConnection,
}

impl ConfigStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

}

async fn find<C: ConnectionTrait>(conn: &C) -> AppResult<Option<Configuration>> {
    let model = ConfigEntity::find_by_id(CONFIG_SINGLETON_ID).one(conn).await?;

    model
        .map(Configuration::try_from)
        .transpose()
        .map_err(AppError::from)
}

async fn find_existing<C: ConnectionTrait>(conn: &C) -> AppResult<Configuration> {
    find(conn)
        .await?
        .ok_or_else(|| AppError::internal("Configuration row missing after seed"))
}

#[async_trait]
impl ConfigRepository for ConfigStore {
    async fn get_or_seed(&self, seed: Configuration) -> AppResult<Configuration> {
        if let Some(existing) = find(&self.db).await? {
            return Ok(existing);
        }

        let active_model = ActiveModel {
            id: Set(CONFIG_SINGLETON_ID),
            step2: Set(components_to_json(&seed.partition.step2)?),
            step3: Set(components_to_json(&seed.partition.step3)?),
            version: Set(seed.version),
            updated_at: Set(seed.updated_at),
        };

        // A concurrent reader may have seeded in between; keep its row.
        let inserted = ConfigEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(onboarding_config::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted > 0 {
            debug!("Seeded default onboarding configuration");
        }

        find_existing(&self.db).await
    }

    async fn replace(&self, partition: Partition) -> AppResult<Configuration> {
        self.get_or_seed(Configuration::seed()).await?;

        // Read back under the row lock taken by the update so the caller sees its own write
        let txn = self.db.begin().await?;

        ConfigEntity::update_many()
            .col_expr(
                onboarding_config::Column::Step2,
                Expr::value(components_to_json(&partition.step2)?),
            )
            .col_expr(
                onboarding_config::Column::Step3,
                Expr::value(components_to_json(&partition.step3)?),
            )
            .col_expr(
                onboarding_config::Column::Version,
                Expr::col(onboarding_config::Column::Version).add(1),
            )
            .col_expr(onboarding_config::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(onboarding_config::Column::Id.eq(CONFIG_SINGLETON_ID))
            .exec(&txn)
            .await?;

        let stored = find_existing(&txn).await?;
        txn.commit().await?;

        Ok(stored)
    }
}
