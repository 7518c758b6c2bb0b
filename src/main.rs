//! c45tree - train and inspect a C4.5 decision tree on a CSV file.
//!
//! Usage:
//!   c45tree --data tennis.csv --target PlayTennis --max-depth 5
//!   c45tree --config run.toml --seed 42 --image

use c45tree::config::RunConfig;
use c45tree::data::Dataset;
use c45tree::error::{Result, TreeError};
use c45tree::export::{render_image, write_report};
use c45tree::logging;
use c45tree::tree::C45Classifier;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Train a C4.5 (gain ratio) decision tree on a CSV file and export it.
///
/// Flags override values read from `--config`.
#[derive(Parser, Debug)]
#[command(name = "c45tree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML run configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CSV file with a header row
    #[arg(short, long, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Name of the label column
    #[arg(short, long, value_name = "COLUMN")]
    target: Option<String>,

    /// Maximum tree depth (root has depth 0)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split
    #[arg(long)]
    min_samples_split: Option<usize>,

    /// Seed for randomized, reproducible tie-breaking between splits
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the tree report and image
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory for runtime.log
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Number of leading rows to show predictions for
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Also render a PNG with the Graphviz `dot` executable
    #[arg(long)]
    image: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if self.data.is_some() {
            config.data = self.data;
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(min_samples_split) = self.min_samples_split {
            config.min_samples_split = min_samples_split;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(log_dir) = self.log_dir {
            config.log_dir = log_dir;
        }
        if let Some(preview) = self.preview {
            config.preview_rows = preview;
        }
        config.render_image |= self.image;
        Ok(config)
    }
}

/// Process exit status for each error class.
fn exit_status(err: &TreeError) -> u8 {
    match err {
        TreeError::Io(_) => 3,
        TreeError::Csv(_) | TreeError::MissingColumn { .. } | TreeError::InvalidLabel { .. } => 4,
        TreeError::Config { .. } => 5,
        _ => 1,
    }
}

fn run(config: &RunConfig) -> Result<()> {
    config.validate()?;
    let data_path = config
        .data
        .as_deref()
        .ok_or_else(|| TreeError::invalid_input("no data file given"))?;

    let run_id = logging::format_run_id(logging::now_local_or_utc()).unwrap_or_else(|e| {
        warn!(error = %e, "could not format run id");
        "unknown".to_string()
    });
    println!("--- C4.5 Decision Tree ---");
    println!("-- Starting Run: {run_id} --");
    info!(run_id, "started execution");

    let dataset = Dataset::from_csv(data_path, &config.target)?;
    println!(
        "Loaded dataset: {} rows, {} features.",
        dataset.n_samples(),
        dataset.n_features()
    );
    if let Some(classes) = dataset.class_names() {
        let mapping: Vec<String> = classes
            .iter()
            .enumerate()
            .map(|(code, name)| format!("{code}={name}"))
            .collect();
        println!("Classes: {}", mapping.join(", "));
    }

    let mut clf = C45Classifier::new()
        .with_min_samples_split(config.min_samples_split)
        .with_max_depth(config.max_depth);
    if let Some(seed) = config.seed {
        clf = clf.with_random_state(seed);
    }

    println!("Training the tree");
    clf.fit(dataset.features(), dataset.labels())?;
    println!("Training completed");

    let (head_x, head_y) = dataset.head(config.preview_rows);
    let preview = clf.predict(&head_x)?;
    println!("\nTesting on first {} rows:", head_y.len());
    println!("Predicted: {preview:?}");
    println!("Actual:    {head_y:?}");

    let accuracy = clf.score(dataset.features(), dataset.labels())?;
    println!("\nAccuracy on training set: {:.2}%", accuracy * 100.0);
    info!(accuracy, "evaluated on training set");

    let tree = clf.tree().ok_or(TreeError::ModelNotTrained)?;
    let report_path = config
        .output_dir
        .join(format!("tree_result_{run_id}.dot"));
    println!(
        "\nSaving readable tree structure to: {}",
        report_path.display()
    );
    write_report(tree, &report_path, dataset.feature_names())?;

    if config.render_image {
        println!("\nGenerating tree image...");
        match render_image(
            tree,
            &config.output_dir,
            &format!("tree_{run_id}"),
            dataset.feature_names(),
        ) {
            Ok(path) => println!("Tree visualization saved to: {}", path.display()),
            Err(e) => warn!(error = %e, "skipping tree image"),
        }
    }

    println!("Done.");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exit_status(&e));
        }
    };

    if let Err(e) = logging::init(&config.log_dir) {
        eprintln!("warning: file logging disabled: {e}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}
