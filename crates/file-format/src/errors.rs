/// Errors during configuration document loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("incompatible configuration version: {found}")]
    IncompatibleVersion { found: String },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed {
        from: String,
        to: String,
        reason: String,
    },
}
