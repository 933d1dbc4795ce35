use crate::chunking::{TileGrid, TileWindow};
use crate::error::{Result, TrackingError};
use gdal::raster::{Buffer, RasterBand};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use log::{debug, info};
use ndarray::Array2;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Georeferencing of the mosaic; its pixels are never read
#[derive(Debug, Clone)]
pub struct MosaicMetadata {
    pub width: usize,
    pub height: usize,
    pub geotransform: [f64; 6],
    pub projection: String,
}

impl MosaicMetadata {
    pub fn spatial_ref(&self) -> Result<SpatialRef> {
        Ok(SpatialRef::from_wkt(&self.projection)?)
    }
}

/// Open the mosaic and extract its geotransform, projection and size
pub fn load_mosaic_metadata(path: &Path) -> Result<MosaicMetadata> {
    info!("Opening mosaic: {}", path.display());
    let dataset = Dataset::open(path)?;

    let count = dataset.raster_count() as usize;
    if count != 1 {
        return Err(TrackingError::BandCount {
            path: path.to_path_buf(),
            count,
        });
    }

    let (width, height) = dataset.raster_size();
    let geotransform = dataset.geo_transform()?;

    debug!("Mosaic dimensions: {}x{}", width, height);
    debug!("Mosaic geotransform: {:?}", geotransform);

    Ok(MosaicMetadata {
        width,
        height,
        geotransform,
        projection: dataset.projection(),
    })
}

/// Open the tracking raster, which must share the mosaic's pixel grid
pub fn open_tracking(path: &Path, mosaic: &MosaicMetadata) -> Result<Dataset> {
    info!("Opening tracking raster: {}", path.display());
    let dataset = Dataset::open(path)?;

    let (width, height) = dataset.raster_size();
    if (width, height) != (mosaic.width, mosaic.height) {
        return Err(TrackingError::DimensionMismatch(
            width,
            height,
            mosaic.width,
            mosaic.height,
        ));
    }

    Ok(dataset)
}

/// Read one tile of the first band
pub fn read_tile(band: &RasterBand, window: &TileWindow) -> Result<Array2<i32>> {
    let buffer = band.read_as::<i32>(window.offset(), window.size(), window.size(), None)?;
    let data_vec: Vec<i32> = buffer.into_iter().collect();
    let data = Array2::from_shape_vec((window.height(), window.width()), data_vec)?;
    Ok(data)
}

/// Distinct non-zero values of a tile, rows scanned in parallel
fn tile_ids(tile: &Array2<i32>) -> HashSet<i32> {
    let rows: Vec<_> = tile.rows().into_iter().collect();
    rows.par_iter()
        .map(|row| row.iter().copied().filter(|&v| v != 0).collect::<HashSet<i32>>())
        .reduce(HashSet::new, |mut acc, ids| {
            acc.extend(ids);
            acc
        })
}

/// Scan the tracking raster tile by tile for its unique non-zero IDs,
/// returned in ascending order
pub fn scan_unique_ids(dataset: &Dataset, tile_size: usize) -> Result<Vec<i32>> {
    info!("Scanning tracking raster for unique image IDs...");
    let band = dataset.rasterband(1)?;
    let (width, height) = dataset.raster_size();

    let mut ids: HashSet<i32> = HashSet::new();
    for window in TileGrid::new(width, height, tile_size).iter() {
        let tile = read_tile(&band, &window)?;
        ids.extend(tile_ids(&tile));
    }

    let mut id_vec: Vec<i32> = ids.into_iter().collect();
    id_vec.sort_unstable();

    info!("Found {} unique image IDs", id_vec.len());
    Ok(id_vec)
}

fn to_bytes(tile: &Array2<i32>) -> Result<Vec<u8>> {
    tile.iter()
        .map(|&v| u8::try_from(v).map_err(|_| TrackingError::TrackingValueOutOfRange(v)))
        .collect()
}

/// Copy the tracking pixels into a Byte GeoTIFF carrying the mosaic's
/// georeferencing.
///
/// An existing target is reused as-is, even if the tracking raster changed
/// since it was written. Returns whether a new raster was written.
pub fn write_georeferenced(
    tracking: &Dataset,
    target: &Path,
    mosaic: &MosaicMetadata,
    nodata: f64,
    tile_size: usize,
) -> Result<bool> {
    if target.exists() {
        info!("Reusing existing projected raster: {}", target.display());
        return Ok(false);
    }

    let partial = target.with_extension("partial.tif");
    info!("Creating projected raster: {}", target.display());

    {
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let mut dataset =
            driver.create_with_band_type::<u8, _>(&partial, mosaic.width, mosaic.height, 1)?;

        dataset.set_geo_transform(&mosaic.geotransform)?;
        dataset.set_projection(&mosaic.projection)?;

        let source = tracking.rasterband(1)?;
        let mut band = dataset.rasterband(1)?;
        band.set_no_data_value(Some(nodata))?;

        for window in TileGrid::new(mosaic.width, mosaic.height, tile_size).iter() {
            let tile = read_tile(&source, &window)?;
            let mut buffer = Buffer::new(window.size(), to_bytes(&tile)?);
            band.write(window.offset(), window.size(), &mut buffer)?;
            debug!(
                "Wrote tile at ({},{}) size {}x{}",
                window.x_min,
                window.y_min,
                window.width(),
                window.height()
            );
        }
    }

    fs::rename(&partial, target)?;
    Ok(true)
}
