pub mod config;
pub mod material;
pub mod printing;
pub mod validation;
pub mod version;

pub use config::*;
pub use material::*;
pub use printing::*;
pub use validation::*;
pub use version::*;
