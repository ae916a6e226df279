// src/bin/structure_cli.rs
use clap::Parser;
use market_structure::config::AnalysisConfig;
use market_structure::data::parse_candles_csv;
use market_structure::{AnalysisRequest, StructureAnalysisEngine};

#[derive(Parser, Debug)]
#[command(name = "structure-cli")]
#[command(about = "Run a market structure analysis over a CSV candle file")]
pub struct Args {
    /// CSV file with time, open, high, low, close (and optional volume) columns
    #[arg(short, long)]
    pub file: String,

    #[arg(short, long, default_value = "EUR/USD")]
    pub symbol: String,

    #[arg(short, long, default_value = "1h")]
    pub timeframe: String,

    /// Swing window n (defaults to SWING_POINT_N or 5)
    #[arg(long)]
    pub swing_window: Option<usize>,

    /// Swings per side considered for trend lines
    #[arg(long)]
    pub trendline_window: Option<usize>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

fn setup_logging(debug: bool) {
    use env_logger::{Builder, Target};
    use log::LevelFilter;

    let mut builder = Builder::from_default_env();
    builder.target(Target::Stderr);

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    builder.init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    setup_logging(args.debug);

    let raw = tokio::fs::read(&args.file).await?;
    let candles = parse_candles_csv(raw.as_slice())?;
    log::info!("Loaded {} candles from {}", candles.len(), args.file);

    let engine = StructureAnalysisEngine::new(AnalysisConfig::from_env());
    let mut request = AnalysisRequest::new(&args.symbol, &args.timeframe, candles);
    request.swing_window = args.swing_window;
    request.trendline_window = args.trendline_window;

    let report = engine.analyze(request)?;
    log::info!("Context: {}", report.context);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}
