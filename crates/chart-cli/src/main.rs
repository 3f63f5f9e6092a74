//! Command-line chart analyzer
//!
//! # Usage
//!
//! ```bash
//! export GEMINI_API_KEY="your-key"
//!
//! chart-cli chart.png
//! chart-cli chart.png --language en --model gemini-1.5-flash
//! chart-cli chart.png --json
//! ```

use anyhow::{Context, bail};
use chart_engine::{AnalyzerConfig, ChartAnalyzer};
use chart_utils::format_price_level;
use chart_vision::providers::GeminiProvider;
use chart_vision::{ImageData, Language};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chart-cli")]
#[command(about = "Analyze a price chart image from the command line", long_about = None)]
struct Args {
    /// Path to the chart image (png, jpg, gif, or webp)
    image: PathBuf,

    /// Response language (th/en)
    #[arg(short, long, default_value = "th")]
    language: String,

    /// Provider model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Print the raw JSON result instead of the summary
    #[arg(long)]
    json: bool,
}

fn media_type_for(path: &Path) -> anyhow::Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    Ok(match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        other => bail!("unsupported image extension: {other:?}"),
    })
}

fn print_summary(analysis: &chart_engine::ChartAnalysis) {
    println!("Trend:      {} ({}% confidence)", analysis.trend, analysis.confidence);

    if !analysis.key_levels.support.is_empty() {
        let levels: Vec<String> = analysis
            .key_levels
            .support
            .iter()
            .map(|&level| format_price_level(level))
            .collect();
        println!("Support:    {}", levels.join(", "));
    }
    if !analysis.key_levels.resistance.is_empty() {
        let levels: Vec<String> = analysis
            .key_levels
            .resistance
            .iter()
            .map(|&level| format_price_level(level))
            .collect();
        println!("Resistance: {}", levels.join(", "));
    }

    if !analysis.indicators.is_empty() {
        println!("\nIndicators:");
        for indicator in &analysis.indicators {
            println!(
                "  [{:>7}] {:<16} {}",
                indicator.signal, indicator.name, indicator.description
            );
        }
    }

    let rec = &analysis.recommendation;
    println!("\nRecommendation: {}", rec.action);
    if let Some(entry) = rec.entry_point {
        println!("  Entry:       {}", format_price_level(entry));
    }
    if let Some(stop) = rec.stop_loss {
        println!("  Stop loss:   {}", format_price_level(stop));
    }
    if let Some(target) = rec.take_profit {
        println!("  Take profit: {}", format_price_level(target));
    }
    println!("  {}", rec.reasoning);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    chart_utils::init_tracing();

    let args = Args::parse();

    let media_type = media_type_for(&args.image)?;
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let image = ImageData::from_bytes(media_type, &bytes);

    let provider = Arc::new(GeminiProvider::from_env()?);
    let mut config = AnalyzerConfig::builder().language(Language::from_code(&args.language));
    if let Some(model) = args.model {
        config = config.model(model);
    }
    let analyzer = ChartAnalyzer::new(provider, config.build()?);

    info!("analyzing {}", args.image.display());
    let analysis = analyzer
        .analyze_image(image)
        .await?
        .with_image_url(args.image.display().to_string());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_summary(&analysis);
    }

    Ok(())
}
