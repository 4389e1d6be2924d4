pub mod error;
pub mod models;
pub mod source;

pub use error::ValidationError;
pub use models::{Draw, DrawRecord, PICK_COUNT, POOL_SIZE};
