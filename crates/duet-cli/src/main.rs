use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod run;
    pub mod version;
}

use commands::run::RunArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Let two models discuss a topic and print the conversation
    Run(RunArgs),

    /// Print the version of duet
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the rendered transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => commands::run::execute(args).await,
        Command::Version => commands::version::execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from([
            "duet",
            "run",
            "--model-1",
            "models/model1.gguf",
            "--model-2",
            "models/model2.gguf",
            "--topic",
            "Is a hot dog a sandwich?",
        ])
        .unwrap();

        let Command::Run(args) = cli.command else {
            panic!("Expected run command");
        };
        assert_eq!(args.model_1.as_deref(), Some("models/model1.gguf"));
        assert_eq!(args.model_2.as_deref(), Some("models/model2.gguf"));
        assert_eq!(args.topic.as_deref(), Some("Is a hot dog a sandwich?"));
        assert_eq!(args.turns, 5);
        assert_eq!(args.host, None);
        assert!(!args.plain);
    }

    #[test]
    fn test_turns_outside_range_rejected() {
        for turns in ["--turns=0", "--turns=11", "--turns=-2"] {
            let result = Cli::try_parse_from(["duet", "run", turns]);
            let err = match result {
                Ok(_) => panic!("{} should be rejected", turns),
                Err(err) => err,
            };
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_sampling_flags() {
        let cli = Cli::try_parse_from([
            "duet",
            "run",
            "--turns",
            "10",
            "--temperature",
            "0.3",
            "--max-tokens",
            "128",
            "--host",
            "http://gpu-box:8080",
            "--plain",
        ])
        .unwrap();

        let Command::Run(args) = cli.command else {
            panic!("Expected run command");
        };
        assert_eq!(args.turns, 10);
        assert_eq!(args.temperature, Some(0.3));
        assert_eq!(args.max_tokens, Some(128));
        assert_eq!(args.host.as_deref(), Some("http://gpu-box:8080"));
        assert!(args.plain);
    }
}
