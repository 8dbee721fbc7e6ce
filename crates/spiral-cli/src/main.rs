//! spiral-stair CLI - generate spiral staircase meshes from the terminal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use spiral_stair::{generate, ExportFormat, FileSink, StairParameters, StaircaseConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spiral-stair")]
#[command(about = "Procedural spiral staircase mesh generator", long_about = None)]
struct Cli {
    /// Log progress (debug level); RUST_LOG overrides
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a staircase and write it to a file
    Generate {
        #[command(flatten)]
        source: ConfigArgs,
        /// Output file (format from extension: .obj, .stl, .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format, overriding the extension
        #[arg(short, long)]
        format: Option<ExportFormat>,
        /// Object name written into the file
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Print the constants derived from the parameters
    Info {
        #[command(flatten)]
        source: ConfigArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        source: ConfigArgs,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[command(flatten)]
    params: ParamOverrides,
}

/// Parameter flags applied on top of the configuration file.
#[derive(Args)]
struct ParamOverrides {
    /// Radial width of each tread (m)
    #[arg(long)]
    stair_width: Option<f64>,
    /// Radius of the central pole (m)
    #[arg(long)]
    pole_radius: Option<f64>,
    /// Gap between pole and treads (m)
    #[arg(long)]
    pole_gap: Option<f64>,
    /// Desired tread depth along the walking line (m)
    #[arg(long)]
    tread_depth: Option<f64>,
    /// Thickness of each tread (m)
    #[arg(long)]
    tread_thickness: Option<f64>,
    /// Desired rise per step (m)
    #[arg(long)]
    target_tread_height: Option<f64>,
    /// Height between floors (m)
    #[arg(long)]
    floor_height: Option<f64>,
    /// Handrail height above the treads (m)
    #[arg(long)]
    railing_height: Option<f64>,
    /// Handrail inset radius (m)
    #[arg(long)]
    railing_radius: Option<f64>,
}

impl ParamOverrides {
    fn apply(&self, params: &mut StairParameters) {
        let fields = [
            (self.stair_width, &mut params.stair_width),
            (self.pole_radius, &mut params.pole_radius),
            (self.pole_gap, &mut params.pole_gap),
            (self.tread_depth, &mut params.tread_depth),
            (self.tread_thickness, &mut params.tread_thickness),
            (self.target_tread_height, &mut params.target_tread_height),
            (self.floor_height, &mut params.floor_height),
            (self.railing_height, &mut params.railing_height),
            (self.railing_radius, &mut params.railing_radius),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl ConfigArgs {
    /// Defaults, then the config file, then flags.
    fn load(&self) -> Result<StaircaseConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config = StaircaseConfig::from_toml_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?;
                debug!(path = %path.display(), "configuration loaded");
                config
            }
            None => StaircaseConfig::default(),
        };
        self.params.apply(&mut config.parameters);
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            source,
            output,
            format,
            target,
        } => {
            let mut config = source.load()?;
            if let Some(target) = target {
                config.target = target;
            }
            generate_file(&config, output, format)?;
        }
        Commands::Info { source, json } => {
            show_info(&source.load()?, json)?;
        }
        Commands::Config { source } => {
            print!("{}", source.load()?.to_toml_string()?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate_file(
    config: &StaircaseConfig,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> Result<()> {
    let (path, format) = resolve_output(output, format)?;
    let mut sink = FileSink::new(&path, format);
    let report = generate(&config.parameters, &config.options, &config.target, &mut sink)
        .with_context(|| format!("generating {}", path.display()))?;

    println!("Wrote {} ({format})", path.display());
    println!("  Steps:      {}", report.constants.step_count);
    println!("  Treads:     {}", report.treads);
    println!("  Balusters:  {}", report.balusters);
    println!("  Per turn:   {}", report.constants.segments);
    println!("  Turns:      {:.3}", report.constants.revolutions());
    println!("  Vertices:   {}", report.vertices);
    println!("  Faces:      {}", report.faces);
    println!("  Components: {}", report.components);
    Ok(())
}

fn resolve_output(
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> Result<(PathBuf, ExportFormat)> {
    match (output, format) {
        (Some(path), Some(format)) => Ok((path, format)),
        (Some(path), None) => match ExportFormat::from_path(&path) {
            Some(format) => Ok((path, format)),
            None => bail!(
                "cannot tell the format of {}; use .obj, .stl or .json, or pass --format",
                path.display()
            ),
        },
        (None, format) => {
            let format = format.unwrap_or_default();
            let path = Path::new("staircase").with_extension(format.extension());
            Ok((path, format))
        }
    }
}

fn show_info(config: &StaircaseConfig, json: bool) -> Result<()> {
    let c = config.parameters.resolve()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&c)?);
        return Ok(());
    }

    println!("Spiral staircase");
    println!("  Steps:                 {}", c.step_count);
    println!("  Tread height:          {:.4} m", c.tread_height);
    println!("  Treads per turn:       {}", c.segments);
    println!("  Angle pitch:           {:.4} rad", c.angle_pitch);
    println!("  Total angle:           {:.4} rad ({:.3} turns)", c.total_angle(), c.revolutions());
    println!("  Walking line radius:   {:.4} m", c.usable_radius_reach);
    println!("  Stair radius:          {:.4} m", c.stair_diameter);
    println!("  Railing radius:        {:.4} m", c.railing_offset_radius);
    println!("  Rail rise per radian:  {:.4} m", c.slope);
    println!("  Rail start height:     {:.4} m", c.rail_start_height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "spiral-stair",
            "info",
            "--floor-height",
            "4.5",
            "--pole-radius",
            "0.1",
        ]);
        let Commands::Info { source, .. } = cli.command else {
            panic!("expected info");
        };
        let config = source.load().unwrap();
        assert_eq!(config.parameters.floor_height, 4.5);
        assert_eq!(config.parameters.pole_radius, 0.1);
        assert_eq!(config.parameters.stair_width, 1.2);
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("spiral-stair-cli-{}.toml", std::process::id()));
        fs::write(&path, "[parameters]\nfloor_height = 4.5\nstair_width = 1.0\n").unwrap();

        let cli = Cli::parse_from([
            "spiral-stair",
            "info",
            "--config",
            path.to_str().unwrap(),
            "--floor-height",
            "2.0",
        ]);
        let Commands::Info { source, .. } = cli.command else {
            panic!("expected info");
        };
        let config = source.load().unwrap();
        fs::remove_file(&path).unwrap();

        let defaults = StairParameters::default();
        assert_eq!(config.parameters.floor_height, 2.0);
        assert_eq!(config.parameters.stair_width, 1.0);
        assert_eq!(
            StairParameters {
                floor_height: defaults.floor_height,
                stair_width: defaults.stair_width,
                ..config.parameters
            },
            defaults
        );
        assert_eq!(config.options, StaircaseConfig::default().options);
        assert_eq!(config.target, "Staircase");
    }

    #[test]
    fn test_output_format_resolution() {
        let (path, format) = resolve_output(None, None).unwrap();
        assert_eq!(path, PathBuf::from("staircase.obj"));
        assert_eq!(format, ExportFormat::Obj);

        let (path, format) = resolve_output(None, Some(ExportFormat::Stl)).unwrap();
        assert_eq!(path, PathBuf::from("staircase.stl"));
        assert_eq!(format, ExportFormat::Stl);

        let (_, format) = resolve_output(Some("out.json".into()), None).unwrap();
        assert_eq!(format, ExportFormat::Json);

        assert!(resolve_output(Some("out.glb".into()), None).is_err());
    }
}
