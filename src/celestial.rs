use crate::error::DiscError;
use crate::types::PlanarPoint;

/// A light source hovering at a fixed height over a planar position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    position: PlanarPoint,
    height: f64,
}

impl CelestialBody {
    pub fn new(position: PlanarPoint, height: f64) -> Result<Self, DiscError> {
        if !(height.is_finite() && height > 0.0) {
            return Err(DiscError::InvalidHeight(height));
        }
        Ok(Self { position, height })
    }

    pub fn position(&self) -> PlanarPoint {
        self.position
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Same height, new planar position.
    pub fn moved_to(self, position: PlanarPoint) -> Self {
        Self { position, ..self }
    }
}

/// Cosine of the zenith angle of `body` seen from `point`.
/// 1 directly below the body, tending to 0 far away, never negative.
pub fn zenith_cosine(point: PlanarPoint, body: &CelestialBody) -> f64 {
    let h = body.height();
    h / point.distance_to(body.position()).hypot(h)
}
