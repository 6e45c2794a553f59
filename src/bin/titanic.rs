//! CLI nad knižnicou.
//!
//! Subcommands:
//!   train     -- grid search + uloženie modelu
//!   evaluate  -- metriky uloženého modelu na označených dátach
//!   predict   -- tabuľka predikcií s kategóriou šance
//!   stats     -- súhrnné štatistiky pre filter

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use titanic_survival::dashboard::{self, AgeRange, ChanceBreakdown, DashboardFilter};
use titanic_survival::{
    load_passengers, run_training, Config, ModelEvaluator, Predictor, Result,
};

#[derive(Parser)]
#[command(name = "titanic", about = "Passenger survival analytics")]
struct Cli {
    /// Path to config.toml (missing file means defaults).
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run grid search with cross-validation and save the best model.
    Train {
        /// Passenger CSV/JSON (overrides [data] csv_path).
        #[arg(long)]
        data: Option<String>,

        /// Output artifact (overrides [model] artifact_path).
        #[arg(long)]
        model: Option<String>,
    },

    /// Evaluate a saved model on labeled passengers.
    Evaluate {
        #[arg(long)]
        data: Option<String>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Print survival predictions, highest probability first.
    Predict {
        #[arg(long)]
        data: Option<String>,

        #[arg(long)]
        model: Option<String>,

        /// Number of rows to print.
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Print quick statistics and key findings for a filter.
    Stats {
        #[arg(long)]
        data: Option<String>,

        /// Passenger class to include (repeatable, default all).
        #[arg(long = "class")]
        classes: Vec<u8>,

        /// Sex to include (repeatable, default all).
        #[arg(long = "sex")]
        sexes: Vec<String>,

        #[arg(long)]
        min_age: Option<f64>,

        #[arg(long)]
        max_age: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Command::Train { data, model } => {
            apply_overrides(&mut config, data, model);
            let summary = run_training(&config)?;

            println!("Best parameters:");
            println!("  n_estimators: {}", summary.grid.best_params.n_estimators);
            match summary.grid.best_params.max_depth {
                Some(depth) => println!("  max_depth: {}", depth),
                None => println!("  max_depth: unbounded"),
            }
            println!("CV accuracy:   {:.4}", summary.grid.best_score);
            println!("Test accuracy: {:.4}", summary.test_accuracy());
            println!("\n{}", summary.test_report);
            println!("Model saved to {}", config.model.artifact_path);
        }

        Command::Evaluate { data, model } => {
            apply_overrides(&mut config, data, model);
            let predictor = Predictor::load(&config.model.artifact_path)?;
            let table = load_passengers(&config.data.csv_path)?;
            let features = predictor.transform(&table)?;
            predictor.validate(&features)?;

            let report = ModelEvaluator::evaluate_model(&predictor.artifact().model, &features)?;
            println!("{}", report);
        }

        Command::Predict { data, model, limit } => {
            apply_overrides(&mut config, data, model);
            let predictor = Predictor::load(&config.model.artifact_path)?;
            let table = load_passengers(&config.data.csv_path)?;

            let mut predictions = predictor.predict_passengers(&table)?;
            predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
            let probabilities: Vec<f64> = predictions.iter().map(|p| p.probability).collect();

            println!(
                "{:>6}  {:<40} {:<7} {:>5} {:>6}  {:<7} {:>6}",
                "Id", "Name", "Sex", "Age", "Pclass", "Chance", "Prob"
            );
            for p in predictions.iter().take(limit) {
                let age = p.age.map(|a| format!("{:.1}", a)).unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}  {:<40} {:<7} {:>5} {:>6}  {:<7} {:>6.3}",
                    p.passenger_id,
                    truncate(&p.name, 40),
                    p.sex,
                    age,
                    p.pclass,
                    p.chance.label(),
                    p.probability
                );
            }

            let breakdown = ChanceBreakdown::from_probabilities(&probabilities);
            println!(
                "\nHigh (>=70%): {}  Medium (40-70%): {}  Low (<40%): {}",
                breakdown.high, breakdown.medium, breakdown.low
            );
        }

        Command::Stats {
            data,
            classes,
            sexes,
            min_age,
            max_age,
        } => {
            apply_overrides(&mut config, data, None);
            let table = load_passengers(&config.data.csv_path)?;
            let records = dashboard::display_records(&table)?;

            let mut filter = DashboardFilter::all(&records);
            if !classes.is_empty() {
                filter = filter.with_classes(classes);
            }
            if !sexes.is_empty() {
                filter = filter.with_genders(sexes);
            }
            let range = AgeRange::new(
                min_age.unwrap_or(filter.age_range.min),
                max_age.unwrap_or(filter.age_range.max),
            )?;
            filter = filter.with_age_range(range);

            let selected: Vec<_> = filter.apply(&records).into_iter().map(|i| &records[i]).collect();
            let output = serde_json::json!({
                "filter": filter,
                "quick_stats": dashboard::quick_stats(&selected),
                "key_findings": dashboard::key_findings(&selected),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, data: Option<String>, model: Option<String>) {
    if let Some(data) = data {
        config.data.csv_path = data;
    }
    if let Some(model) = model {
        config.model.artifact_path = model;
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}
