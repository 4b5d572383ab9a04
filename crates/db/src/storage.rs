use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::SqlitePool;
use strum::{AsRefStr, Display, VariantArray};
use time::OffsetDateTime;

use crate::table::Document;

/// Names of the JSON documents the planner keeps in storage.
#[derive(AsRefStr, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKey {
    #[strum(serialize = "mealPlan")]
    MealPlan,
    #[strum(serialize = "shoppingList")]
    ShoppingList,
    #[strum(serialize = "customSlots")]
    CustomSlots,
    #[strum(serialize = "mealTemplates")]
    Templates,
    #[strum(serialize = "theme")]
    Theme,
}

/// Key-value document storage.
///
/// Every write replaces the whole document under its key. Reads of
/// documents that fail to parse fall back to the type's default so a
/// corrupted entry never blocks the planner from starting.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_raw(&self, key: DocumentKey) -> menuplan_shared::Result<Option<String>> {
        let statement = Query::select()
            .columns([Document::Value])
            .from(Document::Table)
            .and_where(Expr::col(Document::Key).eq(key.as_ref()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    pub async fn put_raw(
        &self,
        key: DocumentKey,
        value: impl Into<String>,
    ) -> menuplan_shared::Result<()> {
        let value = value.into();
        let updated_at = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Document::Table)
            .columns([Document::Key, Document::Value, Document::UpdatedAt])
            .values_panic([key.as_ref().into(), value.into(), updated_at.into()])
            .on_conflict(
                OnConflict::column(Document::Key)
                    .update_columns([Document::Value, Document::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::debug!(key = key.as_ref(), "document saved");

        Ok(())
    }

    pub async fn remove(&self, key: DocumentKey) -> menuplan_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Document::Table)
            .and_where(Expr::col(Document::Key).eq(key.as_ref()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    pub async fn load<T>(&self, key: DocumentKey) -> menuplan_shared::Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(document) => Ok(document),
            Err(err) => {
                tracing::warn!(
                    key = key.as_ref(),
                    error = %err,
                    "malformed document in storage, resetting to default"
                );

                Ok(T::default())
            }
        }
    }

    pub async fn save<T>(&self, key: DocumentKey, document: &T) -> menuplan_shared::Result<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(document)?;
        self.put_raw(key, raw).await
    }
}
