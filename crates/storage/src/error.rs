use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    /// Maps a duplicate start number onto a readable conflict; other errors pass through.
    pub fn on_duplicate_start_nr(self) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation("Start number already taken".to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_unique_violation() {
        assert!(!StorageError::NotFound.is_unique_violation());
    }

    #[test]
    fn test_on_duplicate_start_nr_keeps_other_errors() {
        let err = StorageError::NotFound.on_duplicate_start_nr();
        assert!(matches!(err, StorageError::NotFound));
    }
}
