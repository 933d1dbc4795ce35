use crate::error::{Result, TrackingError};
use gdal::spatial_ref::{CoordTransform, SpatialRef};
use log::info;

/// IAU mean radius of the Moon, in meters
pub const MOON_RADIUS_M: f64 = 1_737_400.0;

/// Proj4 definition of a spherical planetographic longitude/latitude frame
pub fn planetographic_proj4(body_radius: f64) -> String {
    format!("+proj=longlat +a={body_radius} +b={body_radius} +no_defs")
}

/// Target spatial reference for the dissolved polygons
pub fn planetographic_srs(body_radius: f64) -> Result<SpatialRef> {
    if !body_radius.is_finite() || body_radius <= 0.0 {
        return Err(TrackingError::InvalidBodyRadius(body_radius));
    }

    let proj4 = planetographic_proj4(body_radius);
    info!("Output spatial reference: {}", proj4);
    Ok(SpatialRef::from_proj4(&proj4)?)
}

/// Transform from the mosaic's projection into the planetographic frame
pub fn to_planetographic(source: &SpatialRef, body_radius: f64) -> Result<(SpatialRef, CoordTransform)> {
    let target = planetographic_srs(body_radius)?;
    let transform = CoordTransform::new(source, &target)?;
    Ok((target, transform))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moon_proj4() {
        assert_eq!(
            planetographic_proj4(MOON_RADIUS_M),
            "+proj=longlat +a=1737400 +b=1737400 +no_defs"
        );
        assert_eq!(
            planetographic_proj4(3396190.5),
            "+proj=longlat +a=3396190.5 +b=3396190.5 +no_defs"
        );
    }

    #[test]
    fn test_planetographic_srs_is_geographic() {
        let srs = planetographic_srs(MOON_RADIUS_M).unwrap();
        assert!(srs.is_geographic());
        assert!((srs.semi_major().unwrap() - MOON_RADIUS_M).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(matches!(
            planetographic_srs(-1.0),
            Err(TrackingError::InvalidBodyRadius(_))
        ));
        assert!(planetographic_srs(f64::NAN).is_err());
    }

    #[test]
    fn test_transform_from_equirectangular() {
        let source =
            SpatialRef::from_proj4("+proj=eqc +a=1737400 +b=1737400 +units=m +no_defs").unwrap();
        let (_, transform) = to_planetographic(&source, MOON_RADIUS_M).unwrap();

        // One degree of arc along the equator
        let metres = MOON_RADIUS_M.to_radians();
        let mut xs = [metres];
        let mut ys = [0.0];
        let mut zs = [0.0];
        transform.transform_coords(&mut xs, &mut ys, &mut zs).unwrap();
        assert!((xs[0] - 1.0).abs() < 1e-6);
        assert!(ys[0].abs() < 1e-6);
    }
}
