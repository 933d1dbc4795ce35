use crate::config::{MosaicPaths, SCRATCH_LAYER};
use crate::error::{Result, TrackingError};
use crate::mapping::TrackingMap;
use gdal::raster::RasterBand;
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use gdal::vector::{
    FieldValue, Geometry, Layer, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType,
};
use gdal::{Dataset, DriverManager};
use gdal_sys::{CPLErr, OGRErr};
use log::{debug, info};
use std::ffi::CStr;
use std::path::Path;
use std::ptr;

/// Integer field holding the pixel value of each scratch polygon
pub const ID_FIELD: &str = "id";

/// String field naming the source image of each dissolved feature
pub const PRODUCT_ID_FIELD: &str = "product_id";

/// Outcome of dissolving the scratch layer
#[derive(Debug, Clone, Default)]
pub struct DissolveReport {
    pub features: usize,
    /// Number of scratch polygons merged for each tracking ID, in output order
    pub parts: Vec<(i32, usize)>,
}

fn last_cpl_error() -> String {
    // SAFETY: GDAL returns a pointer to a thread-local, NUL-terminated buffer
    let msg = unsafe { CStr::from_ptr(gdal_sys::CPLGetLastErrorMsg()) };
    msg.to_string_lossy().into_owned()
}

pub fn create_shapefile(path: &Path) -> Result<Dataset> {
    let driver = DriverManager::get_driver_by_name("ESRI Shapefile")?;
    Ok(driver.create_vector_only(path)?)
}

/// Polygon layer with a single integer `id` field, in the mosaic's projection
pub fn create_scratch_layer<'a>(
    dataset: &'a mut Dataset,
    name: &str,
    srs: &SpatialRef,
) -> Result<Layer<'a>> {
    let layer = dataset.create_layer(LayerOptions {
        name,
        srs: Some(srs),
        ty: OGRwkbGeometryType::wkbPolygon,
        options: None,
    })?;
    layer.create_defn_fields(&[(ID_FIELD, OGRFieldType::OFTInteger)])?;
    Ok(layer)
}

/// Multipolygon layer with a `product_id` string field
pub fn create_output_layer<'a>(
    dataset: &'a mut Dataset,
    name: &str,
    srs: &SpatialRef,
) -> Result<Layer<'a>> {
    let layer = dataset.create_layer(LayerOptions {
        name,
        srs: Some(srs),
        ty: OGRwkbGeometryType::wkbMultiPolygon,
        options: None,
    })?;
    layer.create_defn_fields(&[(PRODUCT_ID_FIELD, OGRFieldType::OFTString)])?;
    Ok(layer)
}

/// Vectorize every connected same-value region of `band` into `layer`,
/// storing the pixel value in the layer's first field.
///
/// The band doubles as its own mask, so background (zero) pixels produce no
/// polygons.
pub fn polygonize_band(band: &RasterBand, layer: &Layer) -> Result<()> {
    let rv = unsafe {
        gdal_sys::GDALPolygonize(
            band.c_rasterband(),
            band.c_rasterband(),
            layer.c_layer(),
            0,
            ptr::null_mut(),
            None,
            ptr::null_mut(),
        )
    };
    if rv != CPLErr::CE_None {
        return Err(TrackingError::Polygonize(last_cpl_error()));
    }
    Ok(())
}

fn sync_layer(layer: &Layer) -> Result<()> {
    let rv = unsafe { gdal_sys::OGR_L_SyncToDisk(layer.c_layer()) };
    if rv != OGRErr::OGRERR_NONE {
        return Err(TrackingError::LayerSync(last_cpl_error()));
    }
    Ok(())
}

/// Merge every scratch polygon carrying `tracking_id` into one multipolygon,
/// reprojected with `transform`. Returns the geometry and the part count.
pub fn dissolve_id(
    scratch: &mut Layer,
    tracking_id: i32,
    transform: &CoordTransform,
) -> Result<(Geometry, usize)> {
    let mut dissolved = Geometry::empty(OGRwkbGeometryType::wkbMultiPolygon)?;
    let mut parts = 0;

    scratch.set_attribute_filter(&format!("{ID_FIELD} = {tracking_id}"))?;
    for feature in scratch.features() {
        if let Some(geometry) = feature.geometry() {
            dissolved.add_geometry(geometry.transform(transform)?)?;
            parts += 1;
        }
    }
    scratch.clear_attribute_filter();

    Ok((dissolved, parts))
}

/// Write one feature per tracking ID, in ascending ID order, syncing the
/// layer after each one
pub fn write_dissolved(
    scratch: &mut Layer,
    output: &mut Layer,
    map: &TrackingMap,
    transform: &CoordTransform,
) -> Result<DissolveReport> {
    let mut report = DissolveReport::default();

    let mut ids = map.tracking_ids();
    ids.sort_unstable();

    for tracking_id in ids {
        let product_id = map.image_name(tracking_id)?.to_string();
        let (geometry, parts) = dissolve_id(scratch, tracking_id, transform)?;
        debug!(
            "Dissolved {} polygons for ID {} ({})",
            parts, tracking_id, product_id
        );

        output.create_feature_fields(
            geometry,
            &[PRODUCT_ID_FIELD],
            &[FieldValue::StringValue(product_id)],
        )?;
        sync_layer(output)?;

        report.features += 1;
        report.parts.push((tracking_id, parts));
    }

    info!("Wrote {} dissolved features", report.features);
    Ok(report)
}

/// Polygonize the georeferenced tracking raster into the scratch shapefile,
/// then dissolve it into the output shapefile in the planetographic frame
pub fn polygonize_tracking(
    paths: &MosaicPaths,
    image_srs: &SpatialRef,
    output_srs: &SpatialRef,
    transform: &CoordTransform,
    map: &TrackingMap,
) -> Result<DissolveReport> {
    let raster = Dataset::open(&paths.projected)?;
    let band = raster.rasterband(1)?;

    let mut output_ds = create_shapefile(&paths.dissolved)?;
    let mut output = create_output_layer(&mut output_ds, &paths.mosaic_name, output_srs)?;

    let mut scratch_ds = create_shapefile(&paths.scratch)?;
    let mut scratch = create_scratch_layer(&mut scratch_ds, SCRATCH_LAYER, image_srs)?;

    info!("Polygonizing {}", paths.projected.display());
    polygonize_band(&band, &scratch)?;
    debug!("Scratch layer holds {} polygons", scratch.feature_count());

    write_dissolved(&mut scratch, &mut output, map, transform)
}
