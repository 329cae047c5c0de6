use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use letter_mlp::{
    DEFAULT_HIDDEN_LAYER_SIZE, DEFAULT_NUM_LABELS, DEFAULT_SEED, Dataset, Init, LoaderConfig,
    NetworkBuilder,
};

/// Load a letter dataset, build the network and run one forward pass.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Training data path
    training: PathBuf,

    /// Field delimiter (a single ASCII character, or `tab`)
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Treat the first line as a header and skip it
    #[arg(long)]
    has_headers: bool,

    /// Units in the hidden layer
    #[arg(long, default_value_t = DEFAULT_HIDDEN_LAYER_SIZE)]
    hidden: usize,

    /// Number of output classes
    #[arg(long, default_value_t = DEFAULT_NUM_LABELS)]
    labels: usize,

    /// Initial weights are drawn from [0, scale)
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Seed for weight initialization
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn parse_delimiter(s: &str) -> std::result::Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be one ASCII character, got {s:?}")),
        },
    }
}

fn run(args: Args) -> Result<()> {
    debug!("{args:?}");

    let config = LoaderConfig {
        delimiter: args.delimiter,
        has_headers: args.has_headers,
    };

    info!("loading data set from {}", args.training.display());
    let dataset = Dataset::load(&args.training, &config)
        .with_context(|| format!("failed to load {}", args.training.display()))?;
    let (min_label, max_label) = dataset.label_range();
    info!(
        "loaded {} examples x {} features, labels {min_label}..={max_label}",
        dataset.len(),
        dataset.num_features()
    );

    let network = NetworkBuilder::new()
        .hidden_layer(args.hidden)?
        .num_labels(args.labels)?
        .init(Init::Uniform { scale: args.scale })?
        .build_with_seed(dataset, args.seed)
        .context("failed to build network")?;

    let pass = network.forward_pass().context("forward pass failed")?;
    let output = pass.output();
    info!(
        "forward pass complete: output {}x{}, mean activation {:.4}",
        output.rows(),
        output.cols(),
        output.as_slice().iter().sum::<f32>() / output.as_slice().len() as f32
    );

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn only_the_training_path_is_required() {
        let args = Args::try_parse_from(["letter-mlp", "letters.csv"]).unwrap();
        assert_eq!(args.training, PathBuf::from("letters.csv"));
        assert_eq!(args.delimiter, b',');
        assert!(!args.has_headers);
        assert_eq!(args.hidden, 25);
        assert_eq!(args.labels, 26);
        assert_eq!(args.scale, 1.0);
        assert_eq!(args.seed, 0);

        assert!(Args::try_parse_from(["letter-mlp"]).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "letter-mlp",
            "data.tsv",
            "--delimiter",
            "tab",
            "--hidden",
            "4",
            "--labels",
            "3",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(args.delimiter, b'\t');
        assert_eq!((args.hidden, args.labels, args.seed), (4, 3, 7));
    }

    #[test]
    fn delimiter_must_be_a_single_byte() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn run_completes_on_small_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,0.1,0.2\n2,0.3,0.4\n3,0.5,0.6").unwrap();

        let path = file.path().to_string_lossy().into_owned();

        let args = Args::try_parse_from([
            "letter-mlp",
            path.as_str(),
            "--hidden",
            "2",
            "--labels",
            "3",
        ])
        .unwrap();
        assert!(run(args).is_ok());
    }

    #[test]
    fn run_fails_on_ragged_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,0.1,0.2\n2,0.3").unwrap();

        let path = file.path().to_string_lossy().into_owned();

        let args = Args::try_parse_from(["letter-mlp", path.as_str()]).unwrap();
        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"), "{err:#}");
    }
}
