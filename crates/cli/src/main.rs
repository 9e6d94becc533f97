use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dataset::{filter_by_score, limit_by_score, load_items, Item};
use pipeline::{Recommender, RecommenderConfig, RunOutput, SourceRecommendations};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// AniRecs - Content-based anime recommendation engine
#[derive(Parser)]
#[command(name = "ani-recs")]
#[command(about = "Anime recommendations from TF-IDF metadata similarity", long_about = None)]
struct Cli {
    /// Path to the item dataset (JSON array)
    #[arg(short, long, default_value = "data/items.json")]
    input: PathBuf,

    /// Drop items scored below this threshold (0-100) before the run
    #[arg(long)]
    min_score: Option<f32>,

    /// Keep only the N highest-scored items before the run
    #[arg(long)]
    limit: Option<usize>,

    /// Recommendations per item
    #[arg(long, default_value = "10")]
    top_k: usize,

    /// Weight of the genre/tag block (normalized with --desc-weight)
    #[arg(long, default_value = "0.7")]
    meta_weight: f32,

    /// Weight of the synopsis block (normalized with --meta-weight)
    #[arg(long, default_value = "0.3")]
    desc_weight: f32,

    /// Also reject candidates by title/franchise-key containment
    #[arg(long)]
    containment: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute recommendations for the whole dataset and write them out
    Recommend {
        /// Output file for the recommendation table (JSON)
        #[arg(short, long, default_value = "data/recommendations.json")]
        output: PathBuf,

        /// Write the nested title -> [[candidate, score], ...] mapping
        /// instead of the flat table
        #[arg(long)]
        nested: bool,
    },

    /// Show recommendations for a single title
    Similar {
        /// Source title (exact match)
        #[arg(long)]
        title: String,
    },

    /// Run the pipeline and print the run summary only
    Summary,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load and pre-filter the dataset (filtering policy is ours, not the
    // pipeline's)
    println!("Loading items from {}...", cli.input.display());
    let start = Instant::now();
    let mut items = load_items(&cli.input).context("Failed to load item dataset")?;
    if let Some(min_score) = cli.min_score {
        items = filter_by_score(items, min_score);
    }
    if let Some(limit) = cli.limit {
        items = limit_by_score(items, limit);
    }
    println!(
        "{} Loaded {} items in {:?}",
        "✓".green(),
        items.len(),
        start.elapsed()
    );

    let config = RecommenderConfig::default()
        .with_top_k(cli.top_k)
        .with_weights(cli.meta_weight, cli.desc_weight)
        .with_title_containment_check(cli.containment);

    match cli.command {
        Commands::Recommend { output, nested } => handle_recommend(&items, config, output, nested),
        Commands::Similar { title } => handle_similar(&items, config, &title),
        Commands::Summary => handle_summary(&items, config),
    }
}

/// Run the pipeline with a progress line every 1000 items.
fn run_pipeline(items: &[Item], config: RecommenderConfig) -> Result<RunOutput> {
    let recommender = Recommender::new(config)?;
    let start = Instant::now();
    let output = recommender.run_with_progress(items, |done, total| {
        println!("  {done}/{total} items ranked...");
    })?;
    println!(
        "{} Computed recommendations in {:?}",
        "✓".green(),
        start.elapsed()
    );
    tracing::info!(
        items = output.summary.items_processed,
        skipped = output.summary.skipped_items,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "pipeline run complete"
    );
    Ok(output)
}

/// Handle the 'recommend' command
fn handle_recommend(
    items: &[Item],
    config: RecommenderConfig,
    output_path: PathBuf,
    nested: bool,
) -> Result<()> {
    let output = run_pipeline(items, config)?;

    let json = if nested {
        serde_json::to_string_pretty(&output.recommendations.to_nested())?
    } else {
        serde_json::to_string_pretty(&output.recommendations.to_flat())?
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "{} Wrote recommendations for {} items to {}",
        "✓".green(),
        output.recommendations.len(),
        output_path.display()
    );
    print_summary(&output);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(items: &[Item], config: RecommenderConfig, title: &str) -> Result<()> {
    if !items.iter().any(|item| item.title == title) {
        return Err(anyhow!("Title {:?} not found in dataset", title));
    }

    let output = run_pipeline(items, config)?;
    let source = output
        .recommendations
        .for_title(title)
        .ok_or_else(|| anyhow!("No recommendation list produced for {:?}", title))?;

    print_recommendations(source);
    Ok(())
}

/// Handle the 'summary' command
fn handle_summary(items: &[Item], config: RecommenderConfig) -> Result<()> {
    let output = run_pipeline(items, config)?;
    print_summary(&output);
    Ok(())
}

/// Helper to print one source's recommendation list
fn print_recommendations(source: &SourceRecommendations) {
    println!(
        "{}",
        format!("Recommendations for {}:", source.source_title)
            .bold()
            .blue()
    );
    if source.recommendations.is_empty() {
        println!("  (no distinct-franchise candidates found)");
        return;
    }
    for (rank, rec) in source.recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.candidate_title,
            rec.score
        );
    }
}

/// Helper to print the run summary report
fn print_summary(output: &RunOutput) {
    let summary = &output.summary;
    println!("{}", "Run summary:".bold().blue());
    println!("{}Items processed: {}", "• ".cyan(), summary.items_processed);
    println!(
        "{}Vocabulary: {} categorical terms, {} text terms",
        "• ".cyan(),
        summary.meta_vocabulary,
        summary.text_vocabulary
    );
    println!("{}Skipped items: {}", "• ".cyan(), summary.skipped_items);
    for warning in &summary.degenerate_blocks {
        println!("{}{}", "! ".yellow(), warning.yellow());
    }
}
