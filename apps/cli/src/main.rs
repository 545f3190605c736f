use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use kratko_core::{
    FileTranscriptSource, HfInferenceClient, InferenceProvider, ModelStatus, PipelineConfig,
    StdinTranscriptSource, SummarizationPipeline, SummarizeResponse, SummaryLength,
    TranscriptSource, format_duration, format_response_readable, get_cache_dir,
    get_response_path, load_response,
    provider::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV},
    save_response,
};

/// CLI wrapper for SummaryLength (needed for clap ValueEnum)
#[derive(Clone, Copy, Default, ValueEnum)]
enum CliLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl From<CliLength> for SummaryLength {
    fn from(cli: CliLength) -> Self {
        match cli {
            CliLength::Short => SummaryLength::Short,
            CliLength::Medium => SummaryLength::Medium,
            CliLength::Long => SummaryLength::Long,
        }
    }
}

#[derive(Parser)]
#[command(name = "kratko")]
#[command(about = "Summarize long video transcripts with LSA and a hosted abstractive model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a transcript file (plain text, Whisper JSON or caption list)
    Summarize {
        /// Transcript path; reads standard input when omitted or "-"
        input: Option<PathBuf>,

        /// Summary size
        #[arg(short, long, default_value = "medium")]
        length: CliLength,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Force re-processing even if a cached summary exists
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Check whether the hosted model is reachable
    Health {
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Args)]
struct ProviderArgs {
    /// Hugging Face model id
    #[arg(short, long, env = MODEL_ENV, default_value = DEFAULT_MODEL)]
    model: String,

    /// Inference API token
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Inference API base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, hide = true)]
    base_url: String,
}

impl ProviderArgs {
    fn into_provider(self) -> Option<InferenceProvider> {
        let api_key = self.api_key.filter(|key| !key.trim().is_empty())?;
        Some(
            InferenceProvider::new(api_key)
                .with_model(self.model)
                .with_base_url(self.base_url),
        )
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Extractive fallbacks stand in for an outage; never pin them in the cache.
fn should_cache(response: &SummarizeResponse) -> bool {
    !response.used_fallback
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Summarize {
            input,
            length,
            json,
            force,
            provider,
        } => summarize(input, length.into(), json, force, provider).await,
        Command::Health { provider } => health(provider).await,
    }
}

async fn summarize(
    input: Option<PathBuf>,
    length: SummaryLength,
    json: bool,
    force: bool,
    provider: ProviderArgs,
) -> Result<()> {
    // Validate API key early
    let Some(provider) = provider.into_provider() else {
        fail(format!("Missing API key: set {API_KEY_ENV} or pass --api-key"));
    };

    if !json {
        println!(
            "\n{}  {}\n",
            style("kratko").cyan().bold(),
            style("Transcript Summarizer").dim()
        );
    }

    // Step 1: Read transcript
    let source: Box<dyn TranscriptSource> = match input {
        Some(path) if path.as_os_str() != "-" => Box::new(FileTranscriptSource::new(path)),
        _ => Box::new(StdinTranscriptSource),
    };
    let transcript = match source.fetch().await {
        Ok(transcript) => transcript,
        Err(e) => fail(e),
    };
    if !json {
        println!(
            "{} Transcript read: {} words {}",
            style("✓").green().bold(),
            transcript.text.split_whitespace().count(),
            style(format!("({})", transcript.source)).dim()
        );
    }

    // Step 2: Summarize (check cache with model+length)
    let cache_dir = get_cache_dir(&transcript.text, &provider.model);
    let response_path = get_response_path(&cache_dir, length);

    let cached = if force {
        None
    } else {
        load_response(&response_path).await.filter(should_cache)
    };

    let response = match cached {
        Some(response) => {
            if !json {
                println!(
                    "{} Summarized ({}) {}",
                    style("✓").green().bold(),
                    length,
                    style("(cached)").dim()
                );
            }
            response
        }
        None => {
            let spinner = (!json).then(|| {
                create_spinner(&format!("Summarizing with {}...", provider.model))
            });
            let pipeline = SummarizationPipeline::new(
                PipelineConfig::default(),
                HfInferenceClient::new(&provider, PipelineConfig::default().remote),
            );
            let output = match pipeline.run(&transcript.text, length).await {
                Ok(output) => output,
                Err(e) => {
                    if let Some(spinner) = &spinner {
                        spinner.finish_and_clear();
                    }
                    fail(e);
                }
            };
            let response = SummarizeResponse::new(output, transcript.source);
            if should_cache(&response) {
                save_response(&response_path, &response).await?;
            }
            if let Some(spinner) = spinner {
                spinner.finish_with_message(format!(
                    "{} Summarized ({}) in {}",
                    style("✓").green().bold(),
                    length,
                    format_duration(response.processing_time)
                ));
            }
            response
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.used_fallback {
        println!(
            "{} {}",
            style("!").yellow().bold(),
            style("Remote model unavailable, showing extractive summary").yellow()
        );
    }
    if should_cache(&response) {
        println!(
            "\n{} {}\n",
            style("Saved:").dim(),
            style(response_path.display()).cyan()
        );
    } else {
        println!();
    }
    println!("{}", style("─".repeat(60)).dim());

    // Human-readable output
    println!("{}", format_response_readable(&response));

    Ok(())
}

async fn health(provider: ProviderArgs) -> Result<()> {
    let Some(provider) = provider.into_provider() else {
        fail(format!("Missing API key: set {API_KEY_ENV} or pass --api-key"));
    };

    let spinner = create_spinner(&format!("Probing {}...", provider.model));
    let client = HfInferenceClient::new(&provider, PipelineConfig::default().remote);
    let status = client.check_status().await;

    let line = match &status {
        ModelStatus::Available { code } => {
            format!("{} Model available ({code})", style("✓").green().bold())
        }
        ModelStatus::Loading {
            estimated_time: Some(secs),
            ..
        } => format!(
            "{} Model loading, ready in ~{:.0}s",
            style("…").yellow().bold(),
            secs
        ),
        ModelStatus::Loading { .. } => format!("{} Model loading", style("…").yellow().bold()),
        ModelStatus::Error { code, detail } => {
            format!("{} Model error {code}: {detail}", style("✗").red().bold())
        }
        ModelStatus::Down { error } => {
            format!("{} API unreachable: {error}", style("✗").red().bold())
        }
    };
    spinner.finish_with_message(line);

    if matches!(status, ModelStatus::Error { .. } | ModelStatus::Down { .. }) {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_summarize_arguments() {
        let cli = Cli::parse_from([
            "kratko", "summarize", "talk.json", "--length", "long", "--json", "--force",
            "--api-key", "hf_test",
        ]);

        let Command::Summarize {
            input,
            length,
            json,
            force,
            provider,
        } = cli.command
        else {
            panic!("expected summarize");
        };
        assert_eq!(input, Some(PathBuf::from("talk.json")));
        assert_eq!(SummaryLength::from(length), SummaryLength::Long);
        assert!(json && force);
        assert_eq!(provider.api_key.as_deref(), Some("hf_test"));
    }

    fn response(used_fallback: bool) -> SummarizeResponse {
        SummarizeResponse {
            summary: "Traits describe shared behaviour.".to_string(),
            transcript_source: "file".to_string(),
            original_length: 1200,
            summary_length: 4,
            chunks_processed: 2,
            lsa_intermediate_length: 180,
            api_calls_made: 1,
            processing_time: 4.2,
            used_fallback,
        }
    }

    #[test]
    fn only_remote_summaries_are_cached() {
        assert!(should_cache(&response(false)));
        assert!(!should_cache(&response(true)));
    }

    #[test]
    fn blank_api_key_yields_no_provider() {
        let args = ProviderArgs {
            model: DEFAULT_MODEL.to_string(),
            api_key: Some("  ".to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert!(args.into_provider().is_none());
    }
}
