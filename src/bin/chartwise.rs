use std::path::PathBuf;

use anyhow::Context as _;
use chartwise::{Axis, ChartConfig};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "chartwise", version)]
struct Cli {
    /// Log resolution decisions and fallbacks to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print normalized data as JSON.
    Normalize(NormalizeArgs),
    /// Print the resolved scale type and base domain per axis.
    Scales(InputArgs),
    /// Print category string maps.
    Strings(StringsArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input chart configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Emit one array per series instead of a single flattened array.
    #[arg(long, default_value_t = false)]
    series: bool,
}

#[derive(Parser, Debug)]
struct StringsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Restrict output to one axis.
    #[arg(long, value_enum)]
    axis: Option<AxisChoice>,

    /// Scan each series of `data` separately.
    #[arg(long, default_value_t = false)]
    multi: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisChoice {
    X,
    Y,
}

impl From<AxisChoice> for Axis {
    fn from(a: AxisChoice) -> Self {
        match a {
            AxisChoice::X => Axis::X,
            AxisChoice::Y => Axis::Y,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let out = match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args)?,
        Command::Scales(args) => cmd_scales(args)?,
        Command::Strings(args) => cmd_strings(args)?,
    };
    let text = serde_json::to_string_pretty(&out).context("serialize output")?;
    println!("{text}");
    Ok(())
}

fn load(args: &InputArgs) -> anyhow::Result<ChartConfig> {
    ChartConfig::from_path(&args.in_path)
        .with_context(|| format!("load config '{}'", args.in_path.display()))
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<serde_json::Value> {
    let cfg = load(&args.input)?;
    let value = if args.series {
        serde_json::to_value(chartwise::get_series_data(&cfg))
    } else {
        serde_json::to_value(chartwise::get_data(&cfg))
    };
    value.map_err(|e| chartwise::ChartwiseError::serde(e.to_string()).into())
}

fn cmd_scales(args: InputArgs) -> anyhow::Result<serde_json::Value> {
    let cfg = load(&args)?;
    let mut out = serde_json::Map::new();
    for axis in Axis::ALL {
        let base = chartwise::get_base_scale(&cfg, axis);
        out.insert(
            axis.to_string(),
            serde_json::json!({
                "defined": chartwise::is_scale_defined(&cfg, axis),
                "type": chartwise::get_scale_type(&cfg, axis),
                "domain": base.domain(),
                "range": base.range(),
                "capabilities": base
                    .capabilities()
                    .iter()
                    .map(|c| c.method_name())
                    .collect::<Vec<_>>(),
            }),
        );
    }
    Ok(serde_json::Value::Object(out))
}

fn cmd_strings(args: StringsArgs) -> anyhow::Result<serde_json::Value> {
    let cfg = load(&args.input)?;
    let axes: Vec<Axis> = match args.axis {
        Some(a) => vec![a.into()],
        None => Axis::ALL.to_vec(),
    };
    let mut out = serde_json::Map::new();
    for axis in axes {
        let map = chartwise::create_string_map(&cfg, axis, args.multi);
        out.insert(
            axis.to_string(),
            serde_json::to_value(map).context("serialize string map")?,
        );
    }
    Ok(serde_json::Value::Object(out))
}
