//! Command-line interface and the end-to-end build run.

use crate::assembly::Assembly;
use crate::errors::Error;
use crate::float_types::Real;
use crate::io::{IoError, StlFormat, export_parts};
use crate::params::{KnobParams, Resolution};
use crate::parts::build_parts;
use crate::report::{BuildReport, PartReport};
use crate::viewer::{self, Viewer, write_assembly};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "window-knob")]
#[command(author, version, about = "Generate a replacement window-roller knob and its backing as STL files")]
pub struct Cli {
    /// Directory the STL files are written to
    #[arg(long, short = 'o', env = "KNOB_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// JSON file with part dimensions; omitted fields keep their defaults
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Override the knob height (mm)
    #[arg(long)]
    pub knob_height: Option<Real>,

    /// Override the knob diameter (mm)
    #[arg(long)]
    pub knob_diameter: Option<Real>,

    /// Override the fillet radius of both parts (mm)
    #[arg(long)]
    pub fillet_radius: Option<Real>,

    /// Segments around the screw axis
    #[arg(long, default_value_t = Resolution::default().circle_segments)]
    pub segments: usize,

    /// Chords per fillet arc
    #[arg(long, default_value_t = Resolution::default().fillet_segments)]
    pub fillet_segments: usize,

    /// STL encoding
    #[arg(long, value_enum, default_value_t = StlFormat::Binary)]
    pub format: StlFormat,

    /// Also write the assembled parts as one multi-body assembly.stl
    #[arg(long)]
    pub assembly: bool,

    /// Skip showing the assembly
    #[arg(long)]
    pub no_show: bool,

    /// Viewer command, e.g. "f3d --up +z"; the assembly path is appended
    #[arg(long, env = "KNOB_VIEWER")]
    pub viewer: Option<String>,

    /// Print the build report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Defaults, then the JSON file, then individual flags.
    pub fn params(&self) -> Result<KnobParams, IoError> {
        let mut params = match &self.params {
            Some(path) => KnobParams::from_json_file(path)?,
            None => KnobParams::default(),
        };
        if let Some(height) = self.knob_height {
            params.knob_height = height;
        }
        if let Some(diameter) = self.knob_diameter {
            params.knob_diameter = diameter;
        }
        if let Some(radius) = self.fillet_radius {
            params.fillet_radius = radius;
        }
        Ok(params)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            circle_segments: self.segments,
            fillet_segments: self.fillet_segments,
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Build and export both parts, then show the assembly.
///
/// Nothing is written unless both parts were built successfully.
pub fn run(cli: &Cli) -> Result<BuildReport, Error> {
    let params = cli.params()?;
    let resolution = cli.resolution();
    debug!(?params, ?resolution, "building parts");

    let parts = build_parts(&params, &resolution)?;
    let assembly = Assembly::for_parts(&parts, &params);

    let files = export_parts(&parts, &cli.out_dir, cli.format)?;
    let reports = parts
        .iter()
        .zip(&files)
        .map(|((name, mesh), file)| PartReport::new(name, mesh, file))
        .collect::<Result<Vec<_>, _>>()?;

    // last, so a viewer that fails to launch leaves the exported parts behind
    let assembly_file = if !cli.no_show {
        let viewer = cli.viewer.as_deref().and_then(Viewer::from_command);
        Some(viewer::show(&assembly, &cli.out_dir, cli.format, viewer.as_ref())?)
    } else if cli.assembly {
        Some(write_assembly(&assembly, &cli.out_dir, cli.format)?)
    } else {
        None
    };

    Ok(BuildReport::new(params, resolution, reports, &assembly, assembly_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["window-knob", "--knob-height", "25", "--segments", "48"]).unwrap();
        let params = cli.params().unwrap();
        assert_eq!(params.knob_height, 25.0);
        assert_eq!(params.knob_diameter, 35.0);
        assert_eq!(cli.resolution().circle_segments, 48);
        assert_eq!(cli.format, StlFormat::Binary);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn flags_override_the_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("knob.json");
        std::fs::write(&file, r#"{ "knob_height": 30.0, "fillet_radius": 1.0 }"#).unwrap();

        let cli = Cli::try_parse_from([
            "window-knob",
            "--params",
            file.to_str().unwrap(),
            "--fillet-radius",
            "1.5",
            "-vv",
        ])
        .unwrap();
        let params = cli.params().unwrap();
        assert_eq!(params.knob_height, 30.0);
        assert_eq!(params.fillet_radius, 1.5);
        assert_eq!(cli.log_filter(), "trace");
    }

    #[test]
    fn malformed_params_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("knob.json");
        std::fs::write(&file, "{ knob_height: }").unwrap();
        let cli = Cli::try_parse_from(["window-knob", "--params", file.to_str().unwrap()]).unwrap();
        assert!(matches!(cli.params(), Err(IoError::Json(_))));
    }

    #[test]
    fn invalid_dimensions_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "window-knob",
            "--no-show",
            "--fillet-radius",
            "20",
            "--out-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&cli).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::FilletTooLarge { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn viewer_failure_keeps_the_exported_parts() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "window-knob",
            "--segments",
            "16",
            "--fillet-segments",
            "2",
            "--viewer",
            "window-knob-no-such-viewer",
            "--out-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(matches!(run(&cli), Err(Error::Viewer { .. })));
        assert!(dir.path().join("knob.stl").is_file());
        assert!(dir.path().join("backing.stl").is_file());
    }
}
