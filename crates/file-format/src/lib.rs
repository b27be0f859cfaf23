//! Versioned interchange document for box configurations.
//!
//! A saved document is the configuration's own fields plus an envelope
//! (`exportedAt`, `exportVersion`, `company`). Loading accepts every
//! compatible schema version and upgrades older documents to the current one.

pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use errors::LoadError;
pub use load::{load_configuration, load_document, LoadedDocument};
pub use metadata::{ExportEnvelope, COMPANY};
pub use save::{save_configuration, CURRENT_VERSION};
