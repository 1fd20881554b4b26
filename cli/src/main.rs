//! Pickwave CLI
//!
//! Runs the daily pipeline, or inspects the inputs' schema fingerprint and
//! co-pick rules without writing a report.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use pickwave::analytics::mine_copick_rules;
use pickwave::schema::fingerprint_tables;
use pickwave::{Pipeline, PipelineConfig, Report};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pickwave", version, about = "Warehouse picking analytics")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Configuration file and per-table overrides
#[derive(Args)]
struct InputArgs {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Picking wave CSV (path or URL)
    #[arg(long)]
    picking: Option<String>,

    /// Product master CSV (path or URL)
    #[arg(long)]
    product: Option<String>,

    /// Storage slots CSV (path or URL)
    #[arg(long)]
    storage: Option<String>,

    /// Support points CSV (path or URL)
    #[arg(long)]
    support: Option<String>,
}

impl InputArgs {
    fn load_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        let sources = &mut config.sources;
        for (flag, slot) in [
            (&self.picking, &mut sources.picking),
            (&self.product, &mut sources.product),
            (&self.storage, &mut sources.storage),
            (&self.support, &mut sources.support),
        ] {
            if let Some(location) = flag {
                *slot = Some(location.clone());
            }
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the report
    Run {
        #[command(flatten)]
        inputs: InputArgs,

        /// Report path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Previous report (path or URL); defaults to the output path
        #[arg(long)]
        previous: Option<String>,
    },
    /// Print the schema fingerprint of the inputs
    Fingerprint {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Print co-pick association rules
    Rules {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { inputs, output, previous } => {
            let mut config = inputs.load_config()?;
            if let Some(path) = output {
                config.output.path = path;
            }
            if previous.is_some() {
                config.previous = previous;
            }
            run_pipeline(config, &cli.format).await
        }
        Commands::Fingerprint { inputs } => run_fingerprint(inputs.load_config()?, &cli.format).await,
        Commands::Rules { inputs } => run_rules(inputs.load_config()?, &cli.format).await,
    }
}

async fn run_pipeline(config: PipelineConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let output = config.output.path.clone();
    let pipeline = Pipeline::new(config).context("building pipeline")?;
    let report = pipeline
        .run()
        .await
        .with_context(|| format!("writing report to {}", output.display()))?;

    match format {
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
        OutputFormat::Table => print_run_summary(&report, &output),
    }
    Ok(())
}

fn print_run_summary(report: &Report, output: &std::path::Path) {
    let automation = &report.automation_intelligence;
    let drifted: Vec<&str> = report
        .schema_drift
        .iter()
        .filter(|&(_, &changed)| changed)
        .map(|(name, _)| name.as_str())
        .collect();

    println!("Status:      {}", report.status);
    println!("Run:         {}", report.run_id);
    println!("Report:      {}", output.display());
    println!(
        "Score:       {}",
        report
            .data_summary
            .optimized_distance_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Automation:  {}/100", automation.score);
    println!("Rules:       {}", automation.rule_count);
    println!("Suggestions: {}", automation.suggestion_count);
    if !drifted.is_empty() {
        println!("Drift:       {}", drifted.join(", "));
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stage", "Status", "Detail"]);
    for status in &report.stage_status {
        table.add_row(vec![
            status.stage.clone(),
            if status.ok { "ok".to_string() } else { status.error_kind.clone().unwrap_or_default() },
            status.message.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);

    for trigger in &automation.triggers {
        println!("! {}", trigger.message);
    }
}

async fn run_fingerprint(config: PipelineConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let inputs = pipeline.load_datasets().await;
    let fingerprint = fingerprint_tables(
        inputs
            .datasets
            .tables()
            .map(|(kind, table)| (kind.as_str(), table)),
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fingerprint)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Table", "Columns", "Hash"]);
            for (name, fp) in &fingerprint {
                table.add_row(vec![
                    name.clone(),
                    fp.columns.join(", "),
                    fp.hash.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

async fn run_rules(config: PipelineConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config)?;
    let inputs = pipeline.load_datasets().await;
    let config = pipeline.config();
    let rules = mine_copick_rules(&inputs.datasets.picking, &config.columns, &config.mining)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
        OutputFormat::Table => {
            if rules.is_empty() {
                println!("(no rules)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Antecedent", "Consequent", "Count", "Support", "Confidence", "Lift"]);
            for rule in &rules {
                table.add_row(vec![
                    rule.antecedent.clone(),
                    rule.consequent.clone(),
                    rule.count.to_string(),
                    format!("{:.4}", rule.support),
                    format!("{:.4}", rule.confidence),
                    format!("{:.4}", rule.lift),
                ]);
            }
            println!("{}", table);
            println!("{} rule(s)", rules.len());
        }
    }
    Ok(())
}
