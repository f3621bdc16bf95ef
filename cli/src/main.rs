use anyhow::Result;
use clap::{Parser, Subcommand};
use search_cli::{build_server, load_input_docs, render_document, run_console};
use search_core::{DocumentId, DocumentStatus};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Index documents in memory and run TF-IDF queries with minus-words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read stop words, documents and a query from stdin and print the top documents
    Console,
    /// Rank documents loaded from JSON/JSONL files
    Query {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Only return documents with this status
        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
        /// Print results as a JSON array
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Show which query words occur in one document
    Match {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "")]
        stop_words: String,
        #[arg(long)]
        id: DocumentId,
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Console => run_console(&mut io::stdin().lock(), &mut out),
        Commands::Query { input, stop_words, status, json, query } => {
            let server = build_server(&stop_words, load_input_docs(&input)?)?;
            let documents = server.find_top_documents_with_status(&query, status)?;
            tracing::info!(query = %query, hits = documents.len(), "query evaluated");
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&documents)?)?;
            } else {
                for document in &documents {
                    writeln!(out, "{}", render_document(document))?;
                }
            }
            Ok(())
        }
        Commands::Match { input, stop_words, id, query } => {
            let server = build_server(&stop_words, load_input_docs(&input)?)?;
            let (words, status) = server.match_document(&query, id)?;
            writeln!(out, "{{ document_id = {id}, status = {status}, words = [{}] }}", words.join(", "))?;
            Ok(())
        }
    }
}
