use thiserror::Error;

/// Failures while configuring or building a data store
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        // Given a configuration error
        let error = StorageError::Config("GENERIC_DATA_STORE_URL must be set".to_string());

        // When converting to a string
        let error_string = error.to_string();

        // Then it carries the message
        assert_eq!(
            error_string,
            "Configuration error: GENERIC_DATA_STORE_URL must be set"
        );
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<StorageError>();
    }
}
