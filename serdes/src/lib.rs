mod error;
mod macros;
mod serdes;

pub use error::{SerdeError, SerdeResult};
pub use serdes::{ExpSerde, MAX_COLLECTION_LEN};
