use crate::error::{Result, TrackingError};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Source image identifier of one manifest line: the text before the first
/// comma, cut again at the first dot.
pub fn parse_image_name(line: &str) -> &str {
    let field = line.split(',').next().unwrap_or("");
    field.split('.').next().unwrap_or("").trim()
}

/// Parse every non-blank image name, in compositing order
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(parse_image_name)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve a half-open `[start, stop)` slice over `len` items the way a
/// Python slice does: negative bounds count from the end, and anything out of
/// range is clamped rather than rejected.
pub fn slice_bounds(len: usize, start: i64, stop: i64) -> (usize, usize) {
    let len_i = len as i64;
    let resolve = |idx: i64| -> usize {
        let idx = if idx < 0 { idx + len_i } else { idx };
        idx.clamp(0, len_i) as usize
    };

    let start = resolve(start);
    let stop = resolve(stop);
    (start, stop.max(start))
}

/// Apply the tracking range to the parsed manifest.
///
/// The range is offset by `[low - 3, high - 2)`, which keeps compatibility
/// with the mosaics produced upstream.
pub fn slice_range(names: &[String], low: i64, high: i64) -> &[String] {
    let (start, stop) = slice_bounds(names.len(), low - 3, high - 2);
    debug!(
        "Manifest range [{}, {}] -> entries [{}..{}) of {}",
        low,
        high,
        start,
        stop,
        names.len()
    );
    &names[start..stop]
}

/// Read the manifest file and keep the entries inside the tracking range
pub fn read_manifest(path: &Path, low: i64, high: i64) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(TrackingError::ManifestNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let names = parse_manifest(&text);
    let selected = slice_range(&names, low, high).to_vec();

    info!("{} images found.", selected.len());
    Ok(selected)
}
