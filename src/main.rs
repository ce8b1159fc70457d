use std::path::PathBuf;

use circle_graph::{Attributes, CircleGraph, Easing, GraphConfig, LOG_TARGET};
use clap::Parser;
use log::{info, warn};
use simplelog::{Config as LogConfig, LevelFilter, SimpleLogger};

#[derive(Parser, Debug)]
#[command(author, version, about = "Three concentric arcs sweeping open", long_about = None)]
struct Args {
    /// YAML file with circle{1,2,3}Color, circle{1,2,3}InitialAngle and circle{1,2,3}EndAngle
    #[arg(short, long)]
    attributes: Option<PathBuf>,

    #[arg(long, default_value = "Circle Graph")]
    title: String,

    #[arg(long, default_value_t = 400)]
    width: usize,

    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Frame rate cap
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Ease in and out instead of sweeping at constant speed
    #[arg(long)]
    smooth: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, LogConfig::default())?;

    let attributes = match &args.attributes {
        Some(path) => Attributes::load(path).unwrap_or_else(|err| {
            warn!(target: LOG_TARGET, "could not load {}: {err}", path.display());
            Attributes::new()
        }),
        None => Attributes::new(),
    };
    info!(target: LOG_TARGET, "{} attribute(s) set", attributes.len());

    let config = GraphConfig::builder()
        .title(args.title)
        .window_width(args.width)
        .window_height(args.height)
        .max_framerate(args.fps)
        .easing(if args.smooth {
            Easing::AccelerateDecelerate
        } else {
            Easing::Linear
        })
        .build();

    let mut graph = CircleGraph::new(config, &attributes);
    graph.show()
}
