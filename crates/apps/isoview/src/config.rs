use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use formats::IsochroneCatalog;
use layers::{CARTO_ATTRIBUTION, CARTO_POSITRON_URL, TileLayer};
use viewport::{DEFAULT_ZOOM, MAX_ZOOM};

/// Centers served when none are configured.
pub const DEFAULT_CENTERS: [(&str, &str); 2] = [
    ("Center 1", "scuola1.geojson"),
    ("Center 2", "scuola2.geojson"),
];

#[derive(Debug, Parser)]
#[command(name = "isoview", version, about = "Isochrone map viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ViewerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the map page and render API (default).
    Serve,
    /// Load every configured data file and print a summary.
    Check,
}

#[derive(Debug, Clone, Args)]
pub struct ViewerConfig {
    /// Listen address.
    #[arg(long, global = true, env = "ISOVIEW_ADDR", default_value = "127.0.0.1:8501")]
    pub addr: SocketAddr,

    /// Directory that relative data paths are resolved against.
    #[arg(long, global = true, env = "ISOVIEW_DATA_ROOT", default_value = ".")]
    pub data_root: PathBuf,

    /// Isochrone file per center, `NAME=PATH`. Repeatable; order is display order.
    #[arg(
        long = "center",
        global = true,
        value_name = "NAME=PATH",
        env = "ISOVIEW_CENTERS",
        value_delimiter = ',',
        value_parser = parse_center
    )]
    pub centers: Vec<CenterSpec>,

    /// Schools point layer.
    #[arg(long, global = true, env = "ISOVIEW_SCHOOLS", default_value = "POI/schools.geojson")]
    pub schools: PathBuf,

    /// Hospitals point layer.
    #[arg(long, global = true, env = "ISOVIEW_HOSPITALS", default_value = "POI/hospitals.geojson")]
    pub hospitals: PathBuf,

    /// Base map XYZ tile template.
    #[arg(long, global = true, env = "ISOVIEW_TILE_URL", default_value = CARTO_POSITRON_URL)]
    pub tile_url: String,

    /// HTML attribution for the base map.
    #[arg(long, global = true, env = "ISOVIEW_TILE_ATTRIBUTION", default_value = CARTO_ATTRIBUTION)]
    pub tile_attribution: String,

    /// Zoom of the default viewport around a center's start point.
    #[arg(long, global = true, env = "ISOVIEW_DEFAULT_ZOOM", default_value_t = DEFAULT_ZOOM)]
    pub default_zoom: f64,

    /// Map height in pixels.
    #[arg(long, global = true, env = "ISOVIEW_MAP_HEIGHT", default_value_t = 600)]
    pub map_height: u32,

    /// Idle time after which a session's viewport state is dropped.
    #[arg(long, global = true, env = "ISOVIEW_SESSION_TTL_SECS", default_value_t = 3600)]
    pub session_ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterSpec {
    pub name: String,
    pub path: PathBuf,
}

fn parse_center(raw: &str) -> Result<CenterSpec, String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got {raw:?}"))?;
    let name = name.trim();
    let path = path.trim();
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got {raw:?}"));
    }
    Ok(CenterSpec {
        name: name.to_string(),
        path: PathBuf::from(path),
    })
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.default_zoom.is_finite() || !(0.0..=MAX_ZOOM).contains(&self.default_zoom) {
            return Err(format!(
                "default zoom must be within [0, {MAX_ZOOM}], got {}",
                self.default_zoom
            ));
        }
        if self.map_height == 0 {
            return Err("map height must be positive".to_string());
        }
        if self.session_ttl_secs == 0 {
            return Err("session TTL must be positive".to_string());
        }
        Ok(())
    }

    pub fn catalog(&self) -> IsochroneCatalog {
        if self.centers.is_empty() {
            return IsochroneCatalog::with_root(&self.data_root, DEFAULT_CENTERS);
        }
        IsochroneCatalog::with_root(
            &self.data_root,
            self.centers.iter().map(|c| (c.name.clone(), c.path.as_path())),
        )
    }

    pub fn schools_path(&self) -> PathBuf {
        self.resolve(&self.schools)
    }

    pub fn hospitals_path(&self) -> PathBuf {
        self.resolve(&self.hospitals)
    }

    pub fn tiles(&self) -> TileLayer {
        if self.tile_url == CARTO_POSITRON_URL && self.tile_attribution == CARTO_ATTRIBUTION {
            return TileLayer::carto_positron();
        }
        TileLayer::new("Base map", &self.tile_url, &self.tile_attribution)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.data_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command, parse_center};

    #[test]
    fn defaults_match_the_stock_layout() {
        let cli = Cli::try_parse_from(["isoview", "--data-root", "/srv/iso"]).unwrap();
        assert_eq!(cli.command, None);
        let config = cli.config;
        assert!(config.validate().is_ok());
        assert_eq!(config.default_zoom, 12.0);
        assert_eq!(config.map_height, 600);

        let catalog = config.catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Center 1", "Center 2"]);
        assert_eq!(
            catalog.path("Center 1"),
            Some(Path::new("/srv/iso/scuola1.geojson"))
        );
        assert_eq!(
            config.schools_path(),
            Path::new("/srv/iso/POI/schools.geojson")
        );
        assert_eq!(config.tiles().name, "CARTO Positron");
    }

    #[test]
    fn explicit_centers_replace_defaults() {
        let cli = Cli::try_parse_from([
            "isoview",
            "--center",
            "Duomo=duomo.geojson",
            "--center",
            "Navigli = navigli.geojson",
            "check",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Check));
        let catalog = cli.config.catalog();
        assert_eq!(catalog.names().collect::<Vec<_>>(), ["Duomo", "Navigli"]);
        assert_eq!(catalog.path("Navigli"), Some(Path::new("./navigli.geojson")));
    }

    #[test]
    fn shared_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "isoview",
            "check",
            "--data-root",
            "/srv/iso",
            "--center",
            "Duomo=duomo.geojson",
            "--tile-url",
            "https://tiles.example.org/{z}/{x}/{y}.png",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Check));
        assert_eq!(
            cli.config.catalog().path("Duomo"),
            Some(Path::new("/srv/iso/duomo.geojson"))
        );
        assert_eq!(cli.config.tiles().name, "Base map");

        let cli = Cli::try_parse_from(["isoview", "serve", "--map-height", "480"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve));
        assert_eq!(cli.config.map_height, 480);
    }

    #[test]
    fn center_specs_need_name_and_path() {
        assert!(parse_center("Center 1=a.geojson").is_ok());
        assert!(parse_center("Center 1").is_err());
        assert!(parse_center("=a.geojson").is_err());
        assert!(parse_center("Center 1=").is_err());
    }

    #[test]
    fn zoom_out_of_range_is_rejected() {
        let cli = Cli::try_parse_from(["isoview", "--default-zoom", "40"]).unwrap();
        assert!(cli.config.validate().is_err());
    }
}
