use error::LarderError;

pub mod config;
pub mod database;
pub mod error;
pub mod test_utils;
pub mod utils;

pub type LarderResult<T> = std::result::Result<T, LarderError>;
