mod bedrock;
mod config;
mod error;
mod inference;
mod loader;
mod prompt;

use crate::bedrock::Bedrock;
use crate::config::{Config, DEFAULT_LOG_FILE, DEFAULT_MODEL_ID, DEFAULT_PROFILE, DEFAULT_REGION};
use crate::error::Error;
use crate::inference::InvokeModel;
use crate::prompt::{
    TextGenerationConfig, DEFAULT_MAX_TOKEN_COUNT, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};
use anyhow::Result;
use clap::Parser;
use std::io::{stdout, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BANNER: &str = "\n=== Bedrock (Titan) Analysis ===\n";

/// Summarize a test log with a Bedrock-hosted model.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Log file to summarize.
    #[arg(short, long, env = "BEDROCK_LOGPARSE_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Bedrock model identifier.
    #[arg(long, env = "BEDROCK_LOGPARSE_MODEL_ID", default_value = DEFAULT_MODEL_ID)]
    model_id: String,

    /// AWS region hosting the model.
    #[arg(long, env = "BEDROCK_LOGPARSE_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to take credentials from.
    #[arg(long, env = "BEDROCK_LOGPARSE_PROFILE", default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Sampling temperature, between 0 and 1.
    #[arg(long, env = "BEDROCK_LOGPARSE_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Nucleus sampling threshold, between 0 and 1.
    #[arg(long, env = "BEDROCK_LOGPARSE_TOP_P", default_value_t = DEFAULT_TOP_P)]
    top_p: f64,

    /// Upper bound on generated tokens.
    #[arg(long, env = "BEDROCK_LOGPARSE_MAX_TOKEN_COUNT", default_value_t = DEFAULT_MAX_TOKEN_COUNT)]
    max_token_count: u32,

    /// Sequence that stops generation; repeat the flag or comma-separate for several.
    #[arg(
        long = "stop-sequence",
        env = "BEDROCK_LOGPARSE_STOP_SEQUENCES",
        value_delimiter = ','
    )]
    stop_sequences: Vec<String>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            model_id: args.model_id,
            region: args.region,
            profile: args.profile,
            log_path: args.log_file,
            generation: TextGenerationConfig {
                temperature: args.temperature,
                top_p: args.top_p,
                max_token_count: args.max_token_count,
                stop_sequences: args.stop_sequences,
            },
        }
    }
}

/// Load, build, invoke, print. The client is only created once the log has
/// been read, and nothing reaches `out` unless the call succeeded.
fn run<I, C>(config: &Config, connect: C, out: &mut impl Write) -> Result<()>
where
    I: InvokeModel,
    C: FnOnce(&Config) -> error::Result<I>,
{
    let logs = loader::load(&config.log_path)?;
    let request = prompt::build(&logs, &config.generation);

    let client = connect(config)?;
    let analysis = inference::infer(&client, &request)?;
    info!(bytes = analysis.len(), "analysis complete");

    writeln!(out, "{BANNER}")?;
    writeln!(out, "{analysis}")?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from(Args::parse());
    config.validate()?;

    if let Err(e) = run(&config, Bedrock::connect, &mut stdout().lock()) {
        if let Some(not_found @ Error::LogNotFound { .. }) = e.downcast_ref::<Error>() {
            eprintln!("ERROR: {}", not_found);
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
