use serde::{Deserialize, Serialize};

use crate::error::DiscError;

/// Pixel-space point on the output document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl GeoCoordinate {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, DiscError> {
        let lat_ok = latitude_deg.is_finite() && (-90.0..=90.0).contains(&latitude_deg);
        let lon_ok = longitude_deg.is_finite() && (-180.0..=180.0).contains(&longitude_deg);
        if !lat_ok || !lon_ok {
            return Err(DiscError::InvalidCoordinate {
                lat_deg: latitude_deg,
                lon_deg: longitude_deg,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}

/// Point on the disc plane. `radial_distance` is always `hypot(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    x: f64,
    z: f64,
    radial_distance: f64,
}

impl PlanarPoint {
    pub const ORIGIN: PlanarPoint = PlanarPoint {
        x: 0.0,
        z: 0.0,
        radial_distance: 0.0,
    };

    pub fn new(x: f64, z: f64) -> Self {
        Self {
            x,
            z,
            radial_distance: x.hypot(z),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn radial_distance(&self) -> f64 {
        self.radial_distance
    }

    pub fn distance_to(&self, other: PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    pub fn dot(&self, other: PlanarPoint) -> f64 {
        self.x * other.x + self.z * other.z
    }
}

/// Linear RGB triple with components in [0, 1].
///
/// Serialized as a `#rrggbb` string so colors read naturally in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)? as f64 / 255.0,
            g: channel(2)? as f64 / 255.0,
            b: channel(4)? as f64 / 255.0,
        })
    }

    pub fn to_hex(&self) -> String {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    pub fn scaled(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn plus(self, o: Rgb) -> Self {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }

    /// Linear interpolation toward `o`; `t = 0` keeps `self`.
    pub fn mix(self, o: Rgb, t: f64) -> Self {
        self.scaled(1.0 - t).plus(o.scaled(t))
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s).ok_or_else(|| format!("bad color '{s}', expected #rrggbb"))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

#[derive(Debug, Clone)]
pub struct City {
    pub name: String,
    pub coord: GeoCoordinate,
}

// Small helpers used by multiple modules
pub fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    s.parse::<T>().unwrap_or(default)
}

pub fn sexagesimal_dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
    let ad = d.abs();
    sign * (ad + (m * 60.0 + s) / 3600.0)
}

pub fn parse_dms(s: &str) -> Option<(f64, f64, f64)> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    Some((
        parse_or(parts[0], 0.0),
        parse_or(parts[1], 0.0),
        parse_or(parts[2], 0.0),
    ))
}

/// Parse an angle given either as `D:M:S` or decimal degrees.
pub fn parse_angle_deg(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.contains(':') {
        let (d, m, sec) = parse_dms(s)?;
        Some(sexagesimal_dms_to_degrees(d, m, sec))
    } else {
        s.parse().ok()
    }
}

/// Parse a comma separated pair such as `"1200,-350.5"`.
pub fn parse_pair(s: &str) -> Option<(f64, f64)> {
    let (a, b) = s.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
