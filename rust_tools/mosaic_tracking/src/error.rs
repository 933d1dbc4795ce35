use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("Manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Invalid range: expected <LOW> <HIGH>, got {0:?}")]
    InvalidRange(Vec<i64>),

    #[error("Mosaic {path} has {count} raster bands (expected exactly 1)")]
    BandCount { path: PathBuf, count: usize },

    #[error("Tracking raster is {0}x{1} but the mosaic is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("Found {ids} unique tracking IDs but {entries} manifest entries in range")]
    IdCountMismatch { ids: usize, entries: usize },

    #[error("Tracking ID {0} has no manifest entry")]
    UnmappedTrackingId(i32),

    #[error("Tracking value {0} does not fit in a Byte raster")]
    TrackingValueOutOfRange(i32),

    #[error("Invalid chunk size: {0} (must be positive)")]
    InvalidChunkSize(usize),

    #[error("Invalid body radius: {0} meters (must be positive)")]
    InvalidBodyRadius(f64),

    #[error("Polygonize failed: {0}")]
    Polygonize(String),

    #[error("Layer sync failed: {0}")]
    LayerSync(String),
}

pub type Result<T> = std::result::Result<T, TrackingError>;
