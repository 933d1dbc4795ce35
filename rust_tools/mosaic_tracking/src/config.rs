use crate::cli::Args;
use crate::error::{Result, TrackingError};
use std::path::{Path, PathBuf};

/// Base name of the scratch shapefile polygonized into the input directory
pub const SCRATCH_LAYER: &str = "temp";

/// Every file the tool reads or writes, resolved against the input directory
#[derive(Debug, Clone)]
pub struct MosaicPaths {
    pub input_dir: PathBuf,
    pub mosaic_name: String,
    pub manifest: PathBuf,
    pub mosaic: PathBuf,
    pub tracking: PathBuf,
    pub projected: PathBuf,
    pub dissolved: PathBuf,
    pub scratch: PathBuf,
}

impl MosaicPaths {
    pub fn new(input_dir: impl AsRef<Path>, mosaic_name: &str) -> Self {
        let dir = input_dir.as_ref();
        Self {
            input_dir: dir.to_path_buf(),
            mosaic_name: mosaic_name.to_string(),
            manifest: dir.join(format!("{mosaic_name}.map.lis")),
            mosaic: dir.join(format!("{mosaic_name}.tif")),
            tracking: dir.join(format!("{mosaic_name}_tracking.tif")),
            projected: dir.join(format!("{mosaic_name}_tracking_projected.tif")),
            dissolved: dir.join(format!("{mosaic_name}_tracking.shp")),
            scratch: dir.join(format!("{SCRATCH_LAYER}.shp")),
        }
    }

    /// Stem of the output shapefile, also used to find its sidecars
    pub fn dissolved_stem(&self) -> String {
        format!("{}_tracking", self.mosaic_name)
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub paths: MosaicPaths,
    pub low: i64,
    pub high: i64,
    pub body_radius: f64,
    pub nodata: f64,
    pub tile_size: usize,
}

impl RunConfig {
    pub fn new(paths: MosaicPaths, low: i64, high: i64) -> Self {
        Self {
            paths,
            low,
            high,
            body_radius: crate::crs::MOON_RADIUS_M,
            nodata: f64::NAN,
            tile_size: 2000,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        let (low, high) = match args.range.as_slice() {
            [low, high] => (*low, *high),
            other => return Err(TrackingError::InvalidRange(other.to_vec())),
        };

        let config = Self {
            paths: MosaicPaths::new(&args.inputdir, &args.mosaic),
            low,
            high,
            body_radius: args.body_radius,
            nodata: args.nodata.unwrap_or(f64::NAN),
            tile_size: args.tile_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.body_radius.is_finite() || self.body_radius <= 0.0 {
            return Err(TrackingError::InvalidBodyRadius(self.body_radius));
        }
        if self.tile_size == 0 {
            return Err(TrackingError::InvalidChunkSize(self.tile_size));
        }
        Ok(())
    }
}
