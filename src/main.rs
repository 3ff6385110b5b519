//! Caduceus binary: interactive chat, one-shot questions, and report
//! answering over the RAG pipeline.

use anyhow::Context;
use clap::Parser;
use std::io::BufRead;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use caduceus::cli::{Cli, Commands, Output};
use caduceus::report;
use caduceus::{Config, Conversation, RagPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "caduceus=debug"
    } else {
        "caduceus=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(!cli.no_color);
    let config = Config::from_env().context("failed to load configuration")?;
    let pipeline = RagPipeline::from_config(&config).context("failed to build pipeline")?;

    match cli.command {
        Some(Commands::Ask { query }) => {
            let conversation = Conversation::new(config.pipeline.max_history_tokens);
            let answer = pipeline.answer(&conversation, &query).await?;
            output.reply(&answer.text);
        }
        Some(Commands::Report { path, keep }) => {
            run_report(&pipeline, &config, &output, &path, keep).await?;
        }
        Some(Commands::Chat) | None => {
            run_chat(&pipeline, &config, &output).await?;
        }
    }

    Ok(())
}

/// Interactive REPL: one conversation per session, newest turns appended.
async fn run_chat(
    pipeline: &RagPipeline,
    config: &Config,
    output: &Output,
) -> anyhow::Result<()> {
    output.banner();
    let mut conversation = Conversation::new(config.pipeline.max_history_tokens);

    let stdin = std::io::stdin();
    loop {
        output.prompt_marker();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }

        match pipeline.answer(&conversation, query).await {
            Ok(answer) => {
                conversation.push_user(query);
                conversation.push_assistant(&answer.text);
                output.reply(&answer.text);
            }
            Err(e) => output.error(&e.to_string()),
        }
    }

    Ok(())
}

async fn run_report(
    pipeline: &RagPipeline,
    config: &Config,
    output: &Output,
    path: &Path,
    keep: bool,
) -> anyhow::Result<()> {
    if keep {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("report");
        report::save_report(Path::new(&config.pipeline.upload_dir), name, &bytes)?;
    }

    let text = report::load_report_text(path)?;
    let conversation = Conversation::new(config.pipeline.max_history_tokens);
    let answer = pipeline.answer_report(&conversation, &text).await?;
    output.reply(&answer.text);

    Ok(())
}
