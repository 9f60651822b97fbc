use deadpool_diesel::postgres::Pool;
use pragma_common::services::{Service, ServiceRunner};

use crate::IngestorService;
use crate::config::IngestorConfig;

/// Supervised wrapper running the ingestion loop as a service.
pub struct IngestTask {
    db_pool: Pool,
    config: IngestorConfig,
}

impl IngestTask {
    pub const fn new(db_pool: Pool, config: IngestorConfig) -> Self {
        Self { db_pool, config }
    }
}

#[async_trait::async_trait]
impl Service for IngestTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let db_pool = self.db_pool.clone();
        let config = self.config.clone();

        runner.spawn_loop(move |ctx| async move {
            let service = IngestorService::new(db_pool.clone(), config.clone());

            if let Some(result) = ctx.run_until_cancelled(service.run_forever()).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
