use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::Args;
use cliclack::{input, spinner};
use console::style;
use std::env;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use duet::conversation::orchestrator::{DEFAULT_TURNS, MAX_RECOMMENDED_TURNS};
use duet::conversation::{Orchestrator, Transcript};
use duet::errors::{DuetError, DuetResult};
use duet::providers::configs::{LlamaCppProviderConfig, LLAMA_CPP_HOST};
use duet::providers::llama_cpp::LlamaCppProvider;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path or name of the first model (prompted for when omitted)
    #[arg(long = "model-1")]
    pub model_1: Option<String>,

    /// Path or name of the second model (prompted for when omitted)
    #[arg(long = "model-2")]
    pub model_2: Option<String>,

    /// Topic or starting prompt (prompted for when omitted)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Number of turns; each turn is one reply from each model
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_TURNS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_RECOMMENDED_TURNS)
    )]
    pub turns: i64,

    /// Inference server URL (can also be set via DUET_HOST environment variable)
    #[arg(long)]
    pub host: Option<String>,

    /// Sampling temperature sent with every request
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum tokens per reply
    #[arg(long)]
    pub max_tokens: Option<i32>,

    /// Print the transcript as plain text instead of rendered markdown
    #[arg(long)]
    pub plain: bool,
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let model_1 = resolve_input(args.model_1.clone(), "Model 1 GGUF path", "models/model1.gguf")?;
    let model_2 = resolve_input(args.model_2.clone(), "Model 2 GGUF path", "models/model2.gguf")?;
    let topic = resolve_input(
        args.topic.clone(),
        "Topic / starting prompt",
        "Enter a discussion topic...",
    )?;

    let config = provider_config(&args);
    debug!(host = %config.host, "using inference server");
    let provider = LlamaCppProvider::new(config)
        .context("Failed to create the inference client")?;
    let orchestrator = Orchestrator::new(Arc::new(provider));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let spin = spinner();
    spin.start(format!(
        "{} and {} are talking ({} turns)",
        model_1, model_2, args.turns
    ));

    let result = orchestrator
        .run_with_cancellation(&model_1, &model_2, &topic, args.turns, &cancel)
        .await;

    spin.stop("");

    finish(result, args.plain)
}

/// Render a finished run; an interrupted or failed run becomes an error so the process exits non-zero
fn finish(result: DuetResult<Transcript>, plain: bool) -> Result<()> {
    match result {
        Ok(transcript) => render(&transcript, plain),
        Err(DuetError::Cancelled) => {
            eprintln!("{}", style("Conversation cancelled").yellow());
            Err(anyhow!("Conversation cancelled before it finished"))
        }
        Err(err) => Err(err).context("The conversation could not be completed"),
    }
}

fn resolve_input(value: Option<String>, prompt: &str, placeholder: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(input(prompt).placeholder(placeholder).interact()?),
    }
}

fn resolve_host(host: Option<String>) -> String {
    host.or_else(|| env::var("DUET_HOST").ok())
        .unwrap_or_else(|| LLAMA_CPP_HOST.to_string())
}

fn provider_config(args: &RunArgs) -> LlamaCppProviderConfig {
    LlamaCppProviderConfig::new(resolve_host(args.host.clone()))
        .with_temperature(args.temperature)
        .with_max_tokens(args.max_tokens)
}

fn render(transcript: &Transcript, plain: bool) -> Result<()> {
    let content = transcript.render();
    if plain {
        println!("{}", content);
        return Ok(());
    }

    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()?;
    println!();
    Ok(())
}
