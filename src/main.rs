use anyhow::Result;
use clap::Parser;
use docstats::{AnalysisError, AnalyzerConfig, DocumentAnalyzer, EmptySentencePolicy, ReadMode};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "docstats")]
#[command(about = "Sentence and word statistics for a text document")]
#[command(version)]
struct Args {
    /// Document to analyse
    document: PathBuf,

    /// Stop-word list, one word per line
    stop_words: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep punctuation instead of stripping non-alphanumeric characters
    #[arg(long)]
    keep_punctuation: bool,

    /// Lowercase the document and the stop words
    #[arg(long)]
    lowercase: bool,

    /// Drop sentences that normalize to nothing (shifts sentence positions)
    #[arg(long)]
    drop_empty_sentences: bool,

    /// Use memory-mapped I/O for the document
    #[arg(long)]
    use_mmap: bool,

    /// Report how often a word occurs (repeatable)
    #[arg(long = "word", value_name = "WORD")]
    words: Vec<String>,

    /// Print the full analysis as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the full analysis as JSON to this file
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

impl Args {
    /// File config first, then flags on top
    fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::from_file(path)?,
            None => AnalyzerConfig::default(),
        };
        if self.keep_punctuation {
            config.strip_non_alphanumeric = false;
        }
        if self.lowercase {
            config.lowercase = true;
        }
        if self.drop_empty_sentences {
            config.empty_sentences = EmptySentencePolicy::Drop;
        }
        if self.use_mmap {
            config.read_mode = ReadMode::Mmap;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if !args.document.is_file() {
        anyhow::bail!("Document does not exist: {}", args.document.display());
    }
    if !args.stop_words.is_file() {
        anyhow::bail!("Stop-word list does not exist: {}", args.stop_words.display());
    }

    let config = args.analyzer_config()?;
    info!(?config, "Resolved analyzer configuration");

    let analyzer = DocumentAnalyzer::load_async(&args.document, &args.stop_words, &config).await?;
    let summary = analyzer.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.report);
        println!("average sentence length: {:.2}", summary.average_sentence_length);
        println!("average sentence chars: {:.2}", summary.average_sentence_chars);
        println!("parity weighted sum: {}", summary.parity_weighted_sum);
    }

    for word in &args.words {
        match analyzer.occurrence_count(word) {
            Ok(count) => println!("occurrences of {word}: {count}"),
            Err(AnalysisError::NotFound(_)) => println!("occurrences of {word}: not found"),
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(stats_out) = &args.stats_out {
        let content = serde_json::to_string_pretty(&summary)?;
        tokio::fs::write(stats_out, content).await?;
        info!("Wrote analysis to {}", stats_out.display());
    }

    Ok(())
}
