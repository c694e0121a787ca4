//! Shared MongoDB driver error mapping for the property repository.

use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::debug;

use crate::domain::ports::PropertyRepositoryError;

/// Map a driver error into the repository port error.
///
/// Network and server-selection failures become connection errors; every
/// other failure is reported as a query error.
pub(crate) fn map_mongo_error(error: &MongoError) -> PropertyRepositoryError {
    debug!(error = %error, "mongodb operation failed");
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => PropertyRepositoryError::connection(error.to_string()),
        _ => PropertyRepositoryError::query(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn io_failures_are_connection_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = MongoError::from(io);
        assert!(matches!(
            map_mongo_error(&err),
            PropertyRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn other_failures_are_query_errors() {
        let err = MongoError::custom("boom");
        assert!(matches!(
            map_mongo_error(&err),
            PropertyRepositoryError::Query { .. }
        ));
    }
}
