use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mosaic-tracking")]
#[command(about = "Extract per-image provenance polygons from a mosaic tracking raster")]
#[command(version)]
pub struct Args {
    /// Directory containing the mosaic, its tracking raster and manifest
    #[arg(short, long, value_name = "DIR")]
    pub inputdir: String,

    /// Mosaic base name, without extension
    #[arg(short, long, value_name = "NAME")]
    pub mosaic: String,

    /// Minimum/maximum values of the tracking image
    #[arg(short, long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    pub range: Vec<i64>,

    /// Radius of the target body sphere in meters (default: Moon)
    #[arg(long, value_name = "METERS", default_value_t = crate::crs::MOON_RADIUS_M)]
    pub body_radius: f64,

    /// No-data value for the projected tracking raster (default: NaN)
    #[arg(long, value_name = "VALUE")]
    pub nodata: Option<f64>,

    /// Tile edge in pixels used when streaming the tracking raster
    #[arg(long, value_name = "PIXELS", default_value_t = 2000)]
    pub tile_size: usize,

    /// Number of threads (default: all available)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required_flags() {
        let args = Args::try_parse_from([
            "mosaic-tracking",
            "-i",
            "/data",
            "-m",
            "M1",
            "-r",
            "4",
            "10",
        ])
        .unwrap();
        assert_eq!(args.inputdir, "/data");
        assert_eq!(args.mosaic, "M1");
        assert_eq!(args.range, vec![4, 10]);
        assert_eq!(args.body_radius, crate::crs::MOON_RADIUS_M);
        assert_eq!(args.tile_size, 2000);
        assert!(args.nodata.is_none());
    }

    #[test]
    fn test_range_needs_two_values() {
        let res = Args::try_parse_from(["mosaic-tracking", "-i", "/d", "-m", "M", "-r", "4"]);
        assert!(res.is_err());
    }
}
