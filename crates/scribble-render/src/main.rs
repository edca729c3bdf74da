use clap::Parser;
use scribble_core::EngineConfig;
use scribble_render::{RenderOptions, RenderResult, render_png};
use std::path::PathBuf;

/// Render a saved Scribble drawing to PNG
#[derive(Parser, Debug)]
#[command(name = "scribble-render")]
#[command(about = "Render a Scribble shape record file to a PNG image", long_about = None)]
struct Args {
    /// Input JSON record file (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG file
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Width of the drawing region in logical units
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Height of the drawing region in logical units
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Device pixels per logical unit (e.g. 2.0 for sharper output)
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Background color, or "none" for transparent
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Engine configuration file (JSON)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        eprintln!("scribble-render: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> RenderResult<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    let json = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)?
    };

    let options = RenderOptions {
        width: args.width,
        height: args.height,
        scale: args.scale,
        background: (args.background != "none").then(|| args.background.clone()),
    };
    let png = render_png(&json, &options, config)?;
    std::fs::write(&args.output, png)?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}
