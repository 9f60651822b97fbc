use stakewatch_db::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("all {attempts} attempts failed for {endpoint}: {last_error}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        last_error: String,
    },
    #[error(transparent)]
    Database(#[from] DatabaseError),
}
