use std::path::PathBuf;

/// Remove interior rings (holes) from GeoJSON Polygons and MultiPolygons
#[derive(clap::Parser, Debug)]
#[command(name = "filter-rings", version, about)]
pub struct Cli {
    /// Input Feature or FeatureCollection; reads stdin when omitted or "-"
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Output file, defaults to stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Keep holes larger than this many square meters; omitted or 0 removes all holes
    #[arg(short, long, value_name = "SQ_METERS")]
    pub min_area: Option<f64>,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn schema_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_min_area_and_verbosity() {
        let cli = Cli::try_parse_from(["filter-rings", "in.geojson", "-m", "1.25e10", "-vv", "-o", "out.geojson"]).unwrap();
        assert_eq!(cli.min_area, Some(1.25e10));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.input, Some(PathBuf::from("in.geojson")));
        assert_eq!(cli.output, Some(PathBuf::from("out.geojson")));
        assert!(!cli.pretty);
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::try_parse_from(["filter-rings"]).unwrap();
        assert_eq!(cli.input, None);
        assert_eq!(cli.min_area, None);
    }

    #[test]
    fn rejects_non_numeric_min_area() {
        assert!(Cli::try_parse_from(["filter-rings", "-m", "big"]).is_err());
    }
}
