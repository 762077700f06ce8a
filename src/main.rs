mod celestial;
mod chart;
mod config;
mod context;
mod data;
mod eclipse;
mod error;
mod geometry;
mod layers;
mod layout;
mod lighting;
mod phase;
mod projection;
mod sky;
mod types;

use crate::chart::Chart;
use crate::config::{ChartConfig, Margin, SkyConfig};
use crate::context::Datasets;
use crate::data::load_cities;
use crate::sky::Sky;
use crate::types::{parse_angle_deg, parse_pair, GeoCoordinate, PlanarPoint};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use phf::phf_map;

static DECLINATION_PRESETS: phf::Map<&'static str, f64> = phf_map! {
    "equinox" => 0.0,
    "march-equinox" => 0.0,
    "september-equinox" => 0.0,
    "june-solstice" => 23.44,
    "december-solstice" => -23.44,
};

#[derive(Parser, Debug)]
#[command(name = "discsky")]
#[command(about = "Day/night illumination charts for an azimuthal disc map", version)]
struct Args {
    /// Sun planar position as "x,z" in disc units
    #[arg(long, allow_hyphen_values = true, required_unless_present = "dump_config")]
    sun: Option<String>,

    /// Moon planar position as "x,z" in disc units
    #[arg(long, allow_hyphen_values = true, required_unless_present = "dump_config")]
    moon: Option<String>,

    /// Seasonal declination in degrees, or a preset (equinox, june-solstice, december-solstice)
    #[arg(long, default_value = "equinox", allow_hyphen_values = true)]
    declination: String,

    /// Reported eclipse location as "lat,lon", each decimal degrees or degree:minute:second
    #[arg(long, allow_hyphen_values = true)]
    eclipse_at: Option<String>,

    /// Optional TOML file with disc, body, lighting and eclipse settings
    #[arg(long)]
    config: Option<String>,

    /// Optional path override for the city list (CSV, optionally gzipped)
    #[arg(long)]
    cities: Option<String>,

    /// Print the coordinate and illumination under a planar point "x,z" instead of drawing
    #[arg(long, allow_hyphen_values = true)]
    probe: Option<String>,

    /// Print the effective sky configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Output SVG path
    #[arg(
        short = 'o',
        long = "out",
        required_unless_present_any = ["probe", "dump_config"]
    )]
    out: Option<String>,

    /// Optional CSS override file path; if omitted embedded CSS is used
    #[arg(long)]
    css: Option<String>,

    /// Output image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Illumination raster cells across the disc
    #[arg(long, default_value_t = 120)]
    cells: usize,

    /// Parallels step in degrees
    #[arg(long, default_value_t = 10)]
    step_lat_deg: u32,

    /// Meridians step in degrees
    #[arg(long, default_value_t = 30)]
    step_lon_deg: u32,

    /// Leave out the parallels and meridians
    #[arg(long)]
    no_grid: bool,
}

fn parse_planar(s: &str) -> Result<PlanarPoint> {
    let (x, z) = parse_pair(s).ok_or_else(|| anyhow!("bad planar position '{s}', expected x,z"))?;
    if !(x.is_finite() && z.is_finite()) {
        return Err(anyhow!("planar position '{s}' must be finite"));
    }
    Ok(PlanarPoint::new(x, z))
}

fn parse_declination_deg(s: &str) -> Result<f64> {
    if let Some(deg) = DECLINATION_PRESETS.get(s.to_lowercase().as_str()) {
        return Ok(*deg);
    }
    let deg = parse_angle_deg(s).ok_or_else(|| {
        anyhow!("invalid declination '{s}'. Use degrees or: equinox | june-solstice | december-solstice")
    })?;
    if !(-90.0..=90.0).contains(&deg) {
        return Err(anyhow!("declination {deg} outside [-90, 90]"));
    }
    Ok(deg)
}

fn parse_geo(s: &str) -> Result<GeoCoordinate> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("bad coordinate '{s}', expected lat,lon"))?;
    let lat = parse_angle_deg(lat).ok_or_else(|| anyhow!("bad latitude in '{s}'"))?;
    let lon = parse_angle_deg(lon).ok_or_else(|| anyhow!("bad longitude in '{s}'"))?;
    Ok(GeoCoordinate::new(lat, lon)?)
}

fn probe(sky: &Sky, point: PlanarPoint) -> Result<()> {
    let geo = sky
        .project_plane_to_geo(point)
        .with_context(|| format!("probing ({}, {})", point.x(), point.z()))?;
    let s = sky.sample_illumination(point);
    let w = s.weights;
    println!(
        "lat {:.3} lon {:.3}",
        geo.latitude_deg(),
        geo.longitude_deg()
    );
    println!(
        "day {:.3} civil {:.3} nautical {:.3} astronomical {:.3} night {:.3}",
        w.day, w.civil, w.nautical, w.astronomical, w.night
    );
    println!(
        "color {} alpha {:.3} moonlight {:.3}",
        s.color.to_hex(),
        s.alpha,
        s.moon_light
    );
    let phase = sky.sample_moon_phase();
    let eclipse = sky.sample_eclipse();
    println!(
        "declination {:.2} moon phase {:.3} ({:+.3}) eclipse {} (attenuation {:.3})",
        sky.declination_deg(),
        phase.fraction(),
        phase.signed(),
        if eclipse.is_occurring { "yes" } else { "no" },
        eclipse.attenuation
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let sky_cfg = match &args.config {
        Some(path) => SkyConfig::load_from_path(path)?,
        None => SkyConfig::default(),
    };
    if args.dump_config {
        print!("{}", sky_cfg.to_toml_string()?);
        return Ok(());
    }
    let mut sky = Sky::new(sky_cfg).context("invalid sky configuration")?;

    let sun = parse_planar(args.sun.as_deref().unwrap_or_default())?;
    let moon = parse_planar(args.moon.as_deref().unwrap_or_default())?;
    let declination = parse_declination_deg(&args.declination)?;
    sky.update(sun, moon, declination);
    if let Some(s) = &args.eclipse_at {
        sky.report_eclipse(Some(parse_geo(s)?))
            .context("eclipse location")?;
    }

    if let Some(p) = &args.probe {
        return probe(&sky, parse_planar(p)?);
    }

    let cities = load_cities(args.cities.as_deref())?;

    let cfg = ChartConfig {
        width: args.width,
        height: args.height,
        margin: Margin::uniform(40),
        cells: args.cells,
        step_lat_deg: args.step_lat_deg,
        step_lon_deg: args.step_lon_deg,
        show_grid: !args.no_grid,
        ..ChartConfig::default()
    };

    let out = args
        .out
        .ok_or_else(|| anyhow!("--out is required when not probing"))?;
    let chart = Chart::new(Datasets { cities: &cities }, cfg, sky, args.css);
    chart
        .to_file(&out)
        .with_context(|| format!("writing {out}"))?;

    Ok(())
}

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn planar_positions_parse_with_signs() {
        let p = parse_planar("-1200.5,300").unwrap();
        assert!(approx(p.x(), -1200.5, 1e-12));
        assert!(approx(p.z(), 300.0, 1e-12));
        assert!(parse_planar("1200").is_err());
        assert!(parse_planar("inf,0").is_err());
    }

    #[test]
    fn declination_presets_and_degrees() {
        assert_eq!(parse_declination_deg("equinox").unwrap(), 0.0);
        assert_eq!(parse_declination_deg("June-Solstice").unwrap(), 23.44);
        assert_eq!(parse_declination_deg("december-solstice").unwrap(), -23.44);
        assert!(approx(parse_declination_deg("-12.5").unwrap(), -12.5, 1e-12));
        assert!(approx(parse_declination_deg("23:26:00").unwrap(), 23.0 + 26.0 / 60.0, 1e-12));
    }

    #[test]
    fn declination_bad_input_errors() {
        assert!(parse_declination_deg("midsummer").is_err());
        assert!(parse_declination_deg("120").is_err());
    }

    #[test]
    fn geo_parses_decimal_and_dms() {
        let c = parse_geo("55:45:00,37.62").unwrap();
        assert!(approx(c.latitude_deg(), 55.75, 1e-12));
        assert!(approx(c.longitude_deg(), 37.62, 1e-12));
        assert!(parse_geo("55.75").is_err());
        assert!(parse_geo("95,0").is_err());
    }

    #[test]
    fn args_require_out_unless_probing() {
        assert!(Args::try_parse_from(["discsky", "--sun", "1,0", "--moon", "0,1"]).is_err());
        let a = Args::try_parse_from([
            "discsky", "--sun", "-1,0", "--moon", "0,1", "--probe", "0,0",
        ])
        .unwrap();
        assert_eq!(a.sun.as_deref(), Some("-1,0"));
        assert!(a.out.is_none());
        let a = Args::try_parse_from(["discsky", "--sun", "1,0", "--moon", "0,1", "-o", "x.svg"])
            .unwrap();
        assert_eq!(a.out.as_deref(), Some("x.svg"));
        assert_eq!(a.declination, "equinox");
        assert!(!a.no_grid);
    }

    #[test]
    fn no_grid_flag_parses() {
        let a = Args::try_parse_from([
            "discsky", "--sun", "1,0", "--moon", "0,1", "-o", "x.svg", "--no-grid",
        ])
        .unwrap();
        assert!(a.no_grid);
    }

    #[test]
    fn dump_config_needs_no_positions() {
        let a = Args::try_parse_from(["discsky", "--dump-config"]).unwrap();
        assert!(a.dump_config);
        assert!(a.sun.is_none());
    }

    #[test]
    fn probe_rejects_points_off_the_disc() {
        let sky = crate::test_utils::sky_at((1.0, 0.0), (0.0, 1.0), 0.0);
        assert!(probe(&sky, PlanarPoint::new(0.0, 20_000.0)).is_err());
        assert!(probe(&sky, PlanarPoint::new(0.0, 2_000.0)).is_ok());
    }
}
