//! Repository for the `themas` table.

use async_trait::async_trait;
use sqlx::PgPool;
use thema_core::pagination::{Page, PageRequest, SortOrder};
use thema_core::types::DbId;

use crate::models::thema::{Thema, ThemaInput};

/// Column list for `themas` queries.
const COLUMNS: &str = "id, name, rechte, displaycount";

/// Storage operations the Thema handlers depend on.
#[async_trait]
pub trait ThemaRepository: Send + Sync {
    /// Insert when `input.id` is `None`, otherwise replace the row with that id.
    ///
    /// Replacing a row that does not exist fails with
    /// [`sqlx::Error::RowNotFound`]; it never re-creates the row.
    async fn save(&self, input: &ThemaInput) -> Result<Thema, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Thema>, sqlx::Error>;

    async fn exists_by_id(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Fetch one page, ordered by the requested sort and then by `id`.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Thema>, sqlx::Error>;

    /// Delete by id. Deleting an id that does not exist is not an error.
    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error>;
}

/// Postgres-backed [`ThemaRepository`].
#[derive(Debug, Clone)]
pub struct PgThemaRepo {
    pool: PgPool,
}

impl PgThemaRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemaRepository for PgThemaRepo {
    async fn save(&self, input: &ThemaInput) -> Result<Thema, sqlx::Error> {
        match input.id {
            None => {
                let query = format!(
                    "INSERT INTO themas (name, rechte, displaycount) \
                     VALUES ($1, $2, $3) \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Thema>(&query)
                    .bind(&input.name)
                    .bind(&input.rechte)
                    .bind(input.displaycount)
                    .fetch_one(&self.pool)
                    .await
            }
            Some(id) => {
                let query = format!(
                    "UPDATE themas SET \
                         name = $2, \
                         rechte = $3, \
                         displaycount = $4 \
                     WHERE id = $1 \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Thema>(&query)
                    .bind(id)
                    .bind(&input.name)
                    .bind(&input.rechte)
                    .bind(input.displaycount)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            }
        }
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Thema>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM themas WHERE id = $1");
        sqlx::query_as::<_, Thema>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn exists_by_id(&self, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM themas WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Thema>, sqlx::Error> {
        // Count and content must describe the same snapshot.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM themas")
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM themas \
             ORDER BY {} \
             LIMIT $1 OFFSET $2",
            order_by(&request.sort)
        );
        let content = sqlx::query_as::<_, Thema>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            page = request.page,
            size = request.size,
            total,
            returned = content.len(),
            "Fetched thema page",
        );

        Ok(Page::new(content, request, total))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM themas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Map sort orders onto known column names.
///
/// Properties are matched against a fixed set of columns so user input never
/// reaches the SQL text; unknown properties are skipped. `id` is always
/// appended as a tie-breaker so paging is stable.
fn order_by(sort: &[SortOrder]) -> String {
    let mut clauses: Vec<String> = sort
        .iter()
        .filter_map(|order| {
            let column = match order.property.as_str() {
                "id" => "id",
                "name" => "name",
                "rechte" => "rechte",
                "displaycount" => "displaycount",
                _ => return None,
            };
            Some(format!("{column} {}", order.direction.as_sql()))
        })
        .collect();

    if !sort.iter().any(|o| o.property == "id") {
        clauses.push("id ASC".to_string());
    }
    clauses.join(", ")
}
