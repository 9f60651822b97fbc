pub mod errors;
pub mod models;
pub mod pool;
pub mod schema;

use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub use errors::{DatabaseError, ErrorKind};
pub use pool::StakewatchPool;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Page size for the full-history metric read. The derivation engine pages
/// through `historical_metrics` until an empty page is returned.
pub const METRICS_PAGE_SIZE: i64 = 1000;

/// Build the deadpool-diesel Postgres pool used by every service.
pub fn init_pool(app_name: &str, database_url: &str) -> Result<Pool, ErrorKind> {
    let manager = Manager::new(database_url, Runtime::Tokio1);
    let pool = Pool::builder(manager)
        .build()
        .map_err(|e| ErrorKind::Pool(e.to_string()))?;
    tracing::info!("🗃️ [{app_name}] Database pool initialized");
    Ok(pool)
}

/// Apply pending embedded migrations. Called once at startup, before any
/// service runs.
pub async fn run_migrations(pool: &Pool) -> Result<(), ErrorKind> {
    let conn = pool
        .get()
        .await
        .map_err(|e| ErrorKind::Pool(e.to_string()))?;

    conn.interact(|conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| ErrorKind::Migration(e.to_string()))?
    .map_err(ErrorKind::Migration)?;

    tracing::info!("🗃️ Database migrations are up to date");
    Ok(())
}

/// Load the complete metric history, ascending by timestamp.
///
/// Pages of [`METRICS_PAGE_SIZE`] rows are fetched sequentially until an
/// empty page terminates the loop; there is no total-count query. Pages are
/// sequential because each fetch is only issued once the previous page came
/// back non-empty.
pub async fn load_all_metrics(pool: &Pool) -> Result<Vec<models::HistoricalMetric>, DatabaseError> {
    let mut all_rows: Vec<models::HistoricalMetric> = Vec::new();
    let mut offset = 0_i64;

    loop {
        let page = pool
            .interact_with_context(
                format!("load metrics page (offset {offset})"),
                move |conn| models::HistoricalMetric::find_page(METRICS_PAGE_SIZE, offset, conn),
            )
            .await?;

        if page.is_empty() {
            break;
        }
        all_rows.extend(page);
        offset += METRICS_PAGE_SIZE;
    }

    Ok(all_rows)
}
