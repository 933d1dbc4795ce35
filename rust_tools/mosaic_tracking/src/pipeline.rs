use crate::cleanup;
use crate::config::{RunConfig, SCRATCH_LAYER};
use crate::crs;
use crate::error::Result;
use crate::io;
use crate::manifest;
use crate::mapping::TrackingMap;
use crate::polygonize;
use log::info;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub map: TrackingMap,
    pub projected_written: bool,
    pub features: usize,
    pub scratch_removed: usize,
}

/// Run the whole extraction, printing the ID mapping to stdout
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

pub fn run_with_output<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    config.validate()?;
    let paths = &config.paths;

    let names = manifest::read_manifest(&paths.manifest, config.low, config.high)?;

    let mosaic = io::load_mosaic_metadata(&paths.mosaic)?;
    info!("Mosaic size: {}x{}", mosaic.width, mosaic.height);

    let tracking = io::open_tracking(&paths.tracking, &mosaic)?;
    let ids = io::scan_unique_ids(&tracking, config.tile_size)?;
    let map = TrackingMap::build(&ids, &names, config.low)?;
    for entry in map.entries() {
        writeln!(out, "{}", entry.format_line())?;
    }

    let projected_written = io::write_georeferenced(
        &tracking,
        &paths.projected,
        &mosaic,
        config.nodata,
        config.tile_size,
    )?;
    drop(tracking);

    let image_srs = mosaic.spatial_ref()?;
    let (output_srs, transform) = crs::to_planetographic(&image_srs, config.body_radius)?;

    cleanup::remove_shapefile(&paths.input_dir, &paths.dissolved_stem())?;
    cleanup::remove_scratch_files(&paths.input_dir, SCRATCH_LAYER)?;

    let report =
        polygonize::polygonize_tracking(paths, &image_srs, &output_srs, &transform, &map)?;

    let scratch_removed = cleanup::remove_scratch_files(&paths.input_dir, SCRATCH_LAYER)?;

    Ok(RunSummary {
        map,
        projected_written,
        features: report.features,
        scratch_removed,
    })
}
