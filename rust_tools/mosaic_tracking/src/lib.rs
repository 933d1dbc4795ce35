// Library exports for testing and reuse

pub mod chunking;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod crs;
pub mod error;
pub mod io;
pub mod manifest;
pub mod mapping;
pub mod pipeline;
pub mod polygonize;

// Re-export commonly used types
pub use config::{MosaicPaths, RunConfig};
pub use error::{Result, TrackingError};
pub use mapping::{MappingEntry, TrackingMap};
pub use pipeline::{run, RunSummary};
