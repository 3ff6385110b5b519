//! Command-line interface for the caduceus binary.
//!
//! Uses clap for argument parsing and owo-colors for terminal output.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Caduceus - Medical RAG Chatbot Engine
#[derive(Parser, Debug)]
#[command(
    name = "caduceus",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Caduceus - medical RAG chatbot engine",
    long_about = "A medical chatbot answer pipeline: query gating, vector retrieval\n\
                  with cross-encoder reranking, and grounded answer generation over\n\
                  hosted models.\n\n\
                  Run without arguments to start an interactive chat session.",
    after_help = "EXAMPLES:\n    \
                  caduceus                          # Interactive chat session\n    \
                  caduceus ask \"what causes gout?\"  # One-shot question\n    \
                  caduceus report labs.pdf          # Answer over an uploaded report"
)]
pub struct Cli {
    /// Enable verbose output (debug-level tracing)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// Ask a single question and exit
    Ask {
        /// The medical query to answer
        query: String,
    },

    /// Answer over a medical report file (PDF or plain text)
    Report {
        /// Path to the report file
        path: PathBuf,

        /// Also persist a copy under the configured upload directory
        #[arg(long)]
        keep: bool,
    },
}

/// Colored output helpers.
pub struct Output {
    pub colored: bool,
}

impl Output {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Print the session banner.
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n{} {}",
                "caduceus".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
            println!(
                "{}\n",
                "medical RAG chatbot - type 'exit' to quit".dimmed()
            );
        } else {
            println!("\ncaduceus v{}", env!("CARGO_PKG_VERSION"));
            println!("medical RAG chatbot - type 'exit' to quit\n");
        }
    }

    /// Print the user prompt marker (no trailing newline).
    pub fn prompt_marker(&self) {
        use std::io::Write;
        if self.colored {
            print!("{} ", "you>".bright_blue().bold());
        } else {
            print!("you> ");
        }
        let _ = std::io::stdout().flush();
    }

    /// Print an assistant reply.
    pub fn reply(&self, text: &str) {
        if self.colored {
            println!("{} {}\n", "ai>".bright_green().bold(), text);
        } else {
            println!("ai> {}\n", text);
        }
    }

    /// Print an error.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "error:".bright_red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }
}
