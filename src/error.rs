use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscError {
    #[error("coordinate out of range: lat {lat_deg}, lon {lon_deg}")]
    InvalidCoordinate { lat_deg: f64, lon_deg: f64 },

    /// The disc only models the northern hemisphere; the rim is the equator.
    #[error("latitude {0} is south of the equator and not on the disc")]
    LatitudeOutOfDisc(f64),

    #[error("point at distance {distance} lies outside the disc of radius {radius}")]
    OutsideDisc { distance: f64, radius: f64 },

    #[error("disc radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("body height must be positive and finite, got {0}")]
    InvalidHeight(f64),

    #[error("illumination thresholds must be strictly increasing: {0:?}")]
    UnorderedThresholds([f64; 5]),

    #[error("invalid lighting setting: {0}")]
    InvalidLighting(String),

    #[error("eclipse thresholds must satisfy 0 <= near < far, got near {near}, far {far}")]
    InvalidEclipseThresholds { near: f64, far: f64 },
}
