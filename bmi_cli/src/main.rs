use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "BMI calculator with persisted history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI, risk and recommendations
    Calc {
        /// Height value
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        /// Height unit (cm, ft, in)
        #[arg(long)]
        height_unit: Option<String>,

        /// Weight value
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Weight unit (kg, lbs)
        #[arg(long)]
        weight_unit: Option<String>,

        /// Age in years (enables recommendations)
        #[arg(long, default_value = "")]
        age: String,

        /// Gender (male, female)
        #[arg(long)]
        gender: Option<String>,

        /// Save the result to history
        #[arg(long)]
        save: bool,
    },

    /// Show saved entries, newest first
    History,

    /// Show the BMI trend over time
    Trend,

    /// Export history to CSV
    Export {
        /// Output CSV path
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Calc {
            height,
            height_unit,
            weight,
            weight_unit,
            age,
            gender,
            save,
        } => {
            let height_unit = match height_unit {
                Some(u) => u.parse()?,
                None => config.defaults.height_unit,
            };
            let weight_unit = match weight_unit {
                Some(u) => u.parse()?,
                None => config.defaults.weight_unit,
            };
            let gender = match gender {
                Some(g) => g.parse()?,
                None => config.defaults.gender,
            };
            let input = MeasurementInput::from_text(
                &height,
                height_unit,
                &weight,
                weight_unit,
                &age,
                gender,
            );
            cmd_calc(data_dir, &config, &input, save)
        }
        Commands::History => cmd_history(data_dir, &config),
        Commands::Trend => cmd_trend(data_dir, &config),
        Commands::Export { output } => cmd_export(data_dir, &config, &output),
    }
}

fn open_history(data_dir: PathBuf, config: &Config) -> HistoryStore<FileStore> {
    HistoryStore::open_with_key(FileStore::new(data_dir), config.data.history_key.clone())
}

fn cmd_calc(
    data_dir: PathBuf,
    config: &Config,
    input: &MeasurementInput,
    save: bool,
) -> Result<()> {
    let mut engine = Engine::new();
    let Some(assessment) = engine.evaluate(input) else {
        println!("Enter a positive height and weight to calculate your BMI.");
        return Ok(());
    };

    display_assessment(&assessment);

    if save {
        let mut history = open_history(data_dir, config);
        match history.commit(&assessment, input, chrono::Utc::now()) {
            Ok(_) => println!("✓ Saved to history! ({} entries)", history.len()),
            Err(e) => {
                // The entry is kept in memory only; nothing else to do for a one-shot run
                println!("⚠ Result not saved: {}", e);
            }
        }
    }

    Ok(())
}

fn cmd_history(data_dir: PathBuf, config: &Config) -> Result<()> {
    let history = open_history(data_dir, config);
    if history.is_empty() {
        println!("No history data yet. Save your measurements to track progress!");
        return Ok(());
    }

    println!("History Log");
    println!("─────────────────────────────────────────");
    for entry in history.recent_first() {
        println!("  {}", entry.long_date_label());
        println!(
            "    BMI: {:.1} • Weight: {:.1} kg • {}",
            entry.bmi, entry.weight, entry.category
        );
    }

    Ok(())
}

fn cmd_trend(data_dir: PathBuf, config: &Config) -> Result<()> {
    let history = open_history(data_dir, config);
    let points = history.trend();
    if points.is_empty() {
        println!("No history data yet. Save your measurements to track progress!");
        return Ok(());
    }

    println!("BMI Trend Over Time");
    println!("─────────────────────────────────────────");
    for point in points {
        let width = (scale_position(point.bmi) / 100.0 * 30.0).round() as usize;
        println!("  {:>7}  {:>5.1}  {}", point.label, point.bmi, "█".repeat(width));
    }

    Ok(())
}

fn cmd_export(data_dir: PathBuf, config: &Config, output: &std::path::Path) -> Result<()> {
    let history = open_history(data_dir, config);
    let count = export_history(history.entries(), output)?;

    println!("✓ Exported {} entries to CSV", count);
    println!("  CSV: {}", output.display());
    Ok(())
}

fn display_assessment(assessment: &Assessment) {
    let result = &assessment.result;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  Your BMI: {:.1}", result.bmi);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", result.category.name);
    println!("  Range: {} kg/m²", result.category.display_range);

    // Gauge: 15 on the left, 40 on the right
    let width = 40usize;
    let marker = ((assessment.scale_position / 100.0) * (width - 1) as f64).round() as usize;
    let gauge: String = (0..width)
        .map(|i| if i == marker { '▼' } else { '─' })
        .collect();
    println!();
    println!("  15 {} 40", gauge);

    println!();
    println!("  Metabolic risk: {}", assessment.risk.level);
    for description in assessment.risk.descriptions {
        println!("  → {}", description);
    }

    println!();
    println!("  Health risks for {}:", result.category.name);
    for factor in result.category.risk_factors {
        println!("  • {}", factor);
    }

    if !assessment.recommendations.is_empty() {
        println!();
        println!("  Recommendations:");
        for rec in &assessment.recommendations {
            println!("  {} {}", rec.icon, rec.title);
            println!("     {}", rec.description);
        }
    }

    println!();
    println!("  BMI does not account for muscle mass, bone density or body composition.");
    println!("  Consult a healthcare professional for a full health assessment.");
    println!();
}
