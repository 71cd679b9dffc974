use crate::config::{BandGaps, Config, load_config};
use crate::ir::Graph;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::{parse_graph, parse_graphs};
use crate::render::{render_svg, write_output_svg};
use crate::theme::Theme;
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ssr",
    version,
    about = "Lay out and render formula/text summary graphs"
)]
pub struct Args {
    /// Input file (graph or analysis response JSON) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Theme preset (default, modern)
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Viewport width nodes are spread across
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Minimum canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Keep empty rows for levels with no nodes
    #[arg(long = "preserve-gaps")]
    pub preserve_gaps: bool,

    /// Render every analysis in a multi-document response
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Log more (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let input = read_input(args.input.as_deref())?;

    if !args.all {
        let graph = parse_graph(&input)?;
        return write_graph(&graph, &config, args.output_format, args.output.as_deref());
    }

    let graphs = parse_graphs(&input)?;
    if graphs.len() == 1 {
        return write_graph(&graphs[0], &config, args.output_format, args.output.as_deref());
    }
    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, graphs.len())?;
    for (graph, output) in graphs.iter().zip(outputs.iter()) {
        write_graph(graph, &config, args.output_format, Some(output))?;
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(name) = args.theme.as_deref() {
        let theme = Theme::by_name(name).ok_or_else(|| anyhow::anyhow!("Unknown theme: {name}"))?;
        config.render.background = theme.background.clone();
        config.theme = theme;
    }
    if let Some(width) = args.width {
        config.set_viewport_width(width);
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.preserve_gaps {
        config.layout.band_gaps = BandGaps::Preserve;
    }
    Ok(config)
}

fn write_graph(
    graph: &Graph,
    config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let layout = compute_layout(graph, &config.theme, &config.layout);
    match format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_output_svg(&svg, output)
        }
        OutputFormat::Json => match output {
            Some(path) => write_layout_dump(path, &layout),
            None => {
                println!("{}", LayoutDump::from_layout(&layout).to_json()?);
                Ok(())
            }
        },
        OutputFormat::Png => {
            let output = ensure_output(output, "png")?;
            write_png(&layout, config, output)
        }
    }
}

#[cfg(feature = "png")]
fn write_png(layout: &crate::layout::Layout, config: &Config, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &config.theme, &config.render);
    crate::render::write_output_png(&svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &crate::layout::Layout, _config: &Config, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for multiple analyses"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("summary-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("summary");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "ssr",
            "-i",
            "graph.json",
            "-e",
            "json",
            "-w",
            "640",
            "--preserve-gaps",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.width, Some(640.0));
        assert!(args.preserve_gaps);
        assert_eq!(args.verbose, 2);

        let config = build_config(&args).unwrap();
        assert_eq!(config.layout.viewport_width, 640.0);
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.layout.band_gaps, BandGaps::Preserve);
    }

    #[test]
    fn rejects_unknown_theme() {
        let args = Args::try_parse_from(["ssr", "--theme", "neon"]).unwrap();
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn numbers_multi_outputs_after_stem() {
        let outputs =
            resolve_multi_outputs(Some(Path::new("out/summary.svg")), OutputFormat::Svg, 2).unwrap();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("out/summary-1.svg"),
                PathBuf::from("out/summary-2.svg")
            ]
        );
        assert!(resolve_multi_outputs(None, OutputFormat::Png, 2).is_err());
    }
}
