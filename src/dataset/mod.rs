//! Dataset records and loading.

pub mod loader;
pub mod record;

pub use loader::{load_dataset, read_dataset};
pub use record::{Choices, Record};
