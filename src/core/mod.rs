pub mod arguments;
pub mod format;
pub mod protocol;
pub mod server;
pub mod tools;

pub use crate::domain::model::{Agent, ApiResponse, Artwork, Exhibition, Gallery, SearchHit};
pub use crate::domain::ports::{ArtApi, QueryParam};
pub use crate::utils::error::Result;
