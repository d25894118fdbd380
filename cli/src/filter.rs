use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::Cli;

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes).context("Failed to read stdin")?;
            Ok(bytes)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).and_then(|_| stdout.write_all(b"\n"))
                .context("Failed to write stdout")
        }
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let input = read_input(cli.input.as_deref())?;
    info!(bytes = input.len(), min_area = ?cli.min_area, "read input");

    let output = filter_rings::filter_geojson_bytes(&input, cli.min_area, cli.pretty)
        .context("Failed to filter rings")?;

    write_output(cli.output.as_deref(), &output)?;
    info!(bytes = output.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::Value;

    const POLY: &str = r#"{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [
                [[6, 6], [10, 6], [10, 10], [6, 10], [6, 6]],
                [[7, 7], [8, 7], [8, 8], [7, 8], [7, 7]]
            ]
        }
    }"#;

    fn run_with(args: &[&str]) -> Result<Value> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("in.geojson");
        let output = dir.path().join("out.geojson");
        std::fs::write(&input, POLY)?;

        let mut argv = vec!["filter-rings", input.to_str().unwrap(), "-o", output.to_str().unwrap()];
        argv.extend_from_slice(args);
        run(&Cli::try_parse_from(argv)?)?;

        Ok(serde_json::from_slice(&std::fs::read(&output)?)?)
    }

    fn ring_count(value: &Value) -> usize {
        value["geometry"]["coordinates"].as_array().unwrap().len()
    }

    #[test]
    fn strips_all_holes_by_default() {
        assert_eq!(ring_count(&run_with(&[]).unwrap()), 1);
    }

    #[test]
    fn keeps_holes_above_min_area() {
        assert_eq!(ring_count(&run_with(&["-m", "4e9"]).unwrap()), 2);
        assert_eq!(ring_count(&run_with(&["-m", "1.25e10", "--pretty"]).unwrap()), 1);
    }

    #[test]
    fn missing_input_file_reports_path() {
        let cli = Cli::try_parse_from(["filter-rings", "/nonexistent/in.geojson"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/in.geojson"));
    }

    #[test]
    fn rejects_bare_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("geom.geojson");
        std::fs::write(&input, r#"{ "type": "Point", "coordinates": [0, 0] }"#).unwrap();

        let cli = Cli::try_parse_from(["filter-rings", input.to_str().unwrap()]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(err.root_cause().to_string(), "A Feature, or FeatureCollection is required");
    }
}
