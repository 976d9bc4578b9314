use glam::Vec3;

/// Configuration error for geographic coordinates. Raised at construction
/// so a bad coordinate fails fast instead of mid-animation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} out of range [-90, 90]")]
    Latitude(f32),
    #[error("longitude {0} out of range [-180, 180]")]
    Longitude(f32),
}

/// A validated geographic coordinate in degrees. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lat_deg: f32,
    lon_deg: f32,
}

impl GeoPoint {
    pub fn new(lat_deg: f32, lon_deg: f32) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat_deg) || !lat_deg.is_finite() {
            return Err(GeoError::Latitude(lat_deg));
        }
        if !(-180.0..=180.0).contains(&lon_deg) || !lon_deg.is_finite() {
            return Err(GeoError::Longitude(lon_deg));
        }
        Ok(Self { lat_deg, lon_deg })
    }

    pub fn lat_deg(&self) -> f32 {
        self.lat_deg
    }

    pub fn lon_deg(&self) -> f32 {
        self.lon_deg
    }
}

/// Project a geographic coordinate onto a sphere of the given radius.
///
/// Uses the convention `phi = (90 - lat)°`, `theta = (lon + 180)°`,
/// so lat 0 / lon 0 maps to a fixed reference direction. Marker placement
/// and camera aiming both go through this function; if they diverged the
/// camera would not frame the marker.
#[inline]
pub fn project(point: GeoPoint, radius: f32) -> Vec3 {
    let phi = (90.0 - point.lat_deg()).to_radians();
    let theta = (point.lon_deg() + 180.0).to_radians();
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Unit direction from the sphere's center toward the projected point.
/// The zoomed-in camera eye and the marker share this direction.
#[inline]
pub fn surface_direction(point: GeoPoint) -> Vec3 {
    project(point, 1.0).normalize()
}
