use backoffice_core::HttpError;

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    /// The raw id is not a well-formed identifier for `table`.
    InvalidId { table: String, id: String },
    /// The id is well-formed but no record carries it.
    NotFound { table: String, id: String },
    Database(Box<dyn std::error::Error + Send + Sync>),
    Other(String),
}

impl DataError {
    pub fn invalid_id(table: &str, id: &str) -> Self {
        DataError::InvalidId {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn not_found(table: &str, id: impl ToString) -> Self {
        DataError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    /// Construct a `Database` variant from any storage-backend error.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::InvalidId { table, id } => write!(f, "Invalid id for {table}: {id}"),
            DataError::NotFound { table, id } => write!(f, "Not found: {table}/{id}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
            DataError::Other(msg) => write!(f, "Data error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            err @ DataError::InvalidId { .. } => HttpError::BadRequest(err.to_string()),
            err @ DataError::NotFound { .. } => HttpError::NotFound(err.to_string()),
            DataError::Database(e) => HttpError::Internal(e.to_string()),
            DataError::Other(msg) => HttpError::Internal(msg),
        }
    }
}
