use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use investai_core::portfolio::{
    NewPortfolioItem, PortfolioItem, PortfolioRepositoryTrait, PortfolioUpdate,
};
use investai_core::Result;

use super::model::{NewPortfolioItemDB, PortfolioChangesDB, PortfolioItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolios;

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PortfolioRepository { pool, writer }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<PortfolioItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .order((portfolios::added_at.desc(), portfolios::id.desc()))
            .select(PortfolioItemDB::as_select())
            .load::<PortfolioItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(PortfolioItem::from).collect())
    }

    async fn insert(&self, item: NewPortfolioItem) -> Result<PortfolioItem> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PortfolioItem> {
                let created = diesel::insert_into(portfolios::table)
                    .values(NewPortfolioItemDB::from(item))
                    .returning(PortfolioItemDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(PortfolioItem::from(created))
            })
            .await
    }

    async fn update_for_user(
        &self,
        user_id: &str,
        id: i32,
        update: PortfolioUpdate,
    ) -> Result<Option<PortfolioItem>> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Option<PortfolioItem>> {
                let owned = portfolios::table
                    .filter(portfolios::id.eq(id))
                    .filter(portfolios::user_id.eq(&user_id));

                if update.is_empty() {
                    let current = owned
                        .select(PortfolioItemDB::as_select())
                        .first::<PortfolioItemDB>(conn)
                        .optional()
                        .map_err(StorageError::from)?;
                    return Ok(current.map(PortfolioItem::from));
                }

                let updated = diesel::update(owned)
                    .set(PortfolioChangesDB::from(update))
                    .returning(PortfolioItemDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                Ok(updated.map(PortfolioItem::from))
            })
            .await
    }

    async fn delete_for_user(&self, user_id: &str, id: i32) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    portfolios::table
                        .filter(portfolios::id.eq(id))
                        .filter(portfolios::user_id.eq(user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_test_user, setup_db};
    use chrono::{Duration, Utc};

    fn holding(user_id: &str, symbol: &str, shares: f64, days_ago: i64) -> NewPortfolioItem {
        NewPortfolioItem {
            user_id: user_id.to_string(),
            symbol: symbol.to_string(),
            shares,
            avg_cost: 100.0,
            added_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_lists_newest_first() {
        let (pool, writer, _dir) = setup_db();
        let user = create_test_user(&pool, writer.clone(), "alice").await;
        let repo = PortfolioRepository::new(pool, writer);

        let older = repo.insert(holding(&user, "MSFT", 25.0, 1)).await.unwrap();
        let newer = repo.insert(holding(&user, "NVDA", 10.0, 0)).await.unwrap();
        assert!(newer.id > older.id);

        let listed = repo.list_for_user(&user).unwrap();
        assert_eq!(listed[0].symbol, "NVDA");
        assert_eq!(listed[1].symbol, "MSFT");
    }

    #[tokio::test]
    async fn test_update_is_scoped_to_owner() {
        let (pool, writer, _dir) = setup_db();
        let alice = create_test_user(&pool, writer.clone(), "alice").await;
        let bob = create_test_user(&pool, writer.clone(), "bob").await;
        let repo = PortfolioRepository::new(pool, writer);
        let item = repo.insert(holding(&alice, "TSLA", 50.0, 0)).await.unwrap();

        let update = PortfolioUpdate {
            shares: Some(60.0),
            avg_cost: None,
        };
        assert!(repo
            .update_for_user(&bob, item.id, update.clone())
            .await
            .unwrap()
            .is_none());

        let updated = repo
            .update_for_user(&alice, item.id, update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.shares, 60.0);
        assert_eq!(updated.avg_cost, 100.0);

        let unchanged = repo
            .update_for_user(&alice, item.id, PortfolioUpdate::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.shares, 60.0);
    }

    #[tokio::test]
    async fn test_delete_missing_row_affects_nothing() {
        let (pool, writer, _dir) = setup_db();
        let user = create_test_user(&pool, writer.clone(), "alice").await;
        let repo = PortfolioRepository::new(pool, writer);

        assert_eq!(repo.delete_for_user(&user, 42).await.unwrap(), 0);
    }
}
