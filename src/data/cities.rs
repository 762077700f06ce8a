use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use csv::{Reader, ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use serde::Deserialize;

use crate::types::{City, GeoCoordinate, parse_angle_deg};

// Embed the default city list
pub const CITIES_CSV: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cities.csv"));

#[derive(Debug, Deserialize)]
struct CityRow {
    name: String,
    lat: String, // decimal degrees or "D:M:S"
    lon: String,
}

fn parse_cities_from_reader<R: std::io::Read>(mut rdr: Reader<R>) -> Result<Vec<City>> {
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        let row: CityRow = rec.with_context(|| format!("city row {}", i + 1))?;
        let lat = parse_angle_deg(&row.lat)
            .ok_or_else(|| anyhow!("bad latitude '{}' for {}", row.lat, row.name))?;
        let lon = parse_angle_deg(&row.lon)
            .ok_or_else(|| anyhow!("bad longitude '{}' for {}", row.lon, row.name))?;
        let coord = GeoCoordinate::new(lat, lon).with_context(|| row.name.clone())?;
        out.push(City {
            name: row.name,
            coord,
        });
    }
    Ok(out)
}

fn reader_builder() -> ReaderBuilder {
    let mut b = ReaderBuilder::new();
    b.trim(Trim::All);
    b
}

/// Load cities from `path` (`.csv` or gzip-compressed `.csv.gz`), or the
/// embedded list when no path is given.
pub fn load_cities(path: Option<&str>) -> Result<Vec<City>> {
    let cities = match path {
        Some(p) if p.ends_with(".gz") => {
            let file = File::open(Path::new(p)).with_context(|| format!("opening {p}"))?;
            parse_cities_from_reader(reader_builder().from_reader(GzDecoder::new(file)))?
        }
        Some(p) => {
            let rdr = reader_builder()
                .from_path(p)
                .with_context(|| format!("opening {p}"))?;
            parse_cities_from_reader(rdr)?
        }
        None => parse_cities_from_reader(reader_builder().from_reader(CITIES_CSV.as_bytes()))?,
    };
    log::info!("loaded {} cities", cities.len());
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn parse_from_str(csv: &str) -> Result<Vec<City>> {
        parse_cities_from_reader(reader_builder().from_reader(csv.as_bytes()))
    }

    #[test]
    fn parses_decimal_and_dms_rows() {
        let csv = "\
name,lat,lon
Moscow,55.75,37.62
Oslo, 59:54:50 , 10:45:09
";
        let cities = parse_from_str(csv).unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Moscow");
        assert!(approx(cities[0].coord.latitude_deg(), 55.75, 1e-12));
        assert!(approx(cities[1].coord.latitude_deg(), 59.0 + 54.0 / 60.0 + 50.0 / 3600.0, 1e-9));
        assert!(approx(cities[1].coord.longitude_deg(), 10.0 + 45.0 / 60.0 + 9.0 / 3600.0, 1e-9));
    }

    #[test]
    fn bad_rows_are_errors() {
        assert!(parse_from_str("name,lat,lon\nNowhere,north,0\n").is_err());
        assert!(parse_from_str("name,lat,lon\nTooFar,95,0\n").is_err());
    }

    #[test]
    fn embedded_list_loads_and_keeps_southern_cities() {
        let cities = load_cities(None).unwrap();
        assert!(cities.len() >= 8);
        assert!(cities.iter().any(|c| c.name == "Sydney" && c.coord.latitude_deg() < 0.0));
    }

    #[test]
    fn loads_plain_and_gzipped_files() {
        let csv = "name,lat,lon\nAnchorage,61.22,-149.90\n";
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("cities.csv");
        std::fs::write(&plain, csv).unwrap();
        let cities = load_cities(plain.to_str()).unwrap();
        assert_eq!(cities[0].name, "Anchorage");

        let gz = dir.path().join("cities.csv.gz");
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(csv.as_bytes()).unwrap();
        std::fs::write(&gz, enc.finish().unwrap()).unwrap();
        let cities = load_cities(gz.to_str()).unwrap();
        assert_eq!(cities.len(), 1);
        assert!(approx(cities[0].coord.longitude_deg(), -149.90, 1e-12));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_cities(Some("/nonexistent/cities.csv")).is_err());
    }
}
