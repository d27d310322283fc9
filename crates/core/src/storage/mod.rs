mod error;
mod status_mapping;
mod traits;

pub use error::{RepositoryError, Result};
pub use status_mapping::repository_error_from_status;
pub use traits::VibeRepository;
