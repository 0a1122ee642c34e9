//! Input stream ingestion.
//!
//! [`decoder`] frames raw bytes into lines; [`reader`] runs the background loop that
//! feeds those lines into the [`LineStore`](crate::store::LineStore).

pub mod decoder;
pub mod reader;

pub use decoder::LineDecoder;
pub use reader::{ReaderHandle, StreamReader};
