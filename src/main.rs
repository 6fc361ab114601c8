//! `leafscan` CLI - classify leaf photos with the bundled model.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leafscan::{Classifier, ClassifierConfig, DirAssets, OnnxEngine, Prediction, ResizeFilter};

/// Classify photos with a pretrained image model.
#[derive(Parser, Debug)]
#[command(name = "leafscan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Images to classify.
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,

    /// Directory holding the bundled model and labels.
    #[arg(short, long, default_value = "assets", value_name = "DIR")]
    assets: PathBuf,

    /// Model file, relative to the assets directory.
    #[arg(short, long, default_value = "model.onnx", value_name = "PATH")]
    model: PathBuf,

    /// Label file, relative to the assets directory.
    #[arg(short, long, default_value = "labels.txt", value_name = "PATH")]
    labels: PathBuf,

    /// Square input resolution of the model.
    #[arg(short, long, default_value = "224", value_name = "INT")]
    size: u32,

    /// Resampling filter for scaling images.
    #[arg(long, value_enum, default_value_t = Filter::Bilinear)]
    filter: Filter,

    /// Report predictions scoring below this as "unknown".
    #[arg(long, value_name = "FLOAT")]
    min_score: Option<f32>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Filter {
    Nearest,
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl From<Filter> for ResizeFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => Self::Nearest,
            Filter::Bilinear => Self::Bilinear,
            Filter::CatmullRom => Self::CatmullRom,
            Filter::Lanczos3 => Self::Lanczos3,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("leafscan={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` if any image could not be classified.
fn run(args: &Args) -> Result<bool> {
    if args.images.is_empty() {
        anyhow::bail!("No image selected; pass at least one image path");
    }

    let config = ClassifierConfig {
        model_path: args.model.clone(),
        label_path: args.labels.clone(),
        input_size: args.size,
        filter: args.filter.into(),
    };

    let assets = DirAssets::new(&args.assets);
    let classifier = Classifier::<OnnxEngine>::new(&assets, &config)
        .with_context(|| format!("Failed to load classifier from {}", args.assets.display()))?;

    let pb = if args.images.len() > 1 {
        let pb = ProgressBar::new(args.images.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut all_ok = true;
    for path in &args.images {
        match classify_file(&classifier, path) {
            Ok(prediction) => {
                let label = display_label(&prediction, args.min_score);
                pb.println(format!("{}\t{label}\t{:.4}", path.display(), prediction.score));
            }
            Err(err) => {
                all_ok = false;
                pb.suspend(|| tracing::error!("{err:#}"));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(all_ok)
}

fn classify_file(classifier: &Classifier<OnnxEngine>, path: &Path) -> Result<Prediction> {
    let photo = leafscan::image::load_image(path)?;
    classifier
        .classify(&photo)
        .with_context(|| format!("Failed to classify {}", path.display()))
}

fn display_label(prediction: &Prediction, min_score: Option<f32>) -> &str {
    match min_score {
        Some(min) if prediction.score < min => "unknown",
        _ => &prediction.label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(score: f32) -> Prediction {
        Prediction {
            index: 1,
            label: "leaf_spot".to_string(),
            score,
        }
    }

    #[test]
    fn test_display_label_without_threshold() {
        assert_eq!(display_label(&prediction(0.01), None), "leaf_spot");
    }

    #[test]
    fn test_display_label_threshold() {
        assert_eq!(display_label(&prediction(0.3), Some(0.5)), "unknown");
        assert_eq!(display_label(&prediction(0.5), Some(0.5)), "leaf_spot");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["leafscan", "leaf.jpg"]).unwrap();
        assert_eq!(args.images, [PathBuf::from("leaf.jpg")]);
        assert_eq!(args.size, 224);
        assert_eq!(args.model, PathBuf::from("model.onnx"));
        assert!(matches!(args.filter, Filter::Bilinear));
    }

    #[test]
    fn test_no_images_is_error() {
        let args = Args::try_parse_from(["leafscan"]).unwrap();
        assert!(run(&args).is_err());
    }
}
