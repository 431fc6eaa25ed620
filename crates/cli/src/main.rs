use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ragnote_driver::{Backend, Driver, Message, QueryRequest, Role, Template};
use ragnote_vector_store::{AddRequest, HashEmbedder, RagIndex};
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod output;

use config::AppConfig;
use output::SearchHit;

#[derive(Parser)]
#[command(name = "ragnote")]
#[command(about = "Minimal retrieval-augmented generation toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Input sources for one run; at least one is required
#[derive(Args)]
struct SourceArgs {
    /// Raw text to index
    #[arg(long)]
    text: Option<String>,

    /// Local text file to index
    #[arg(long)]
    file: Option<PathBuf>,

    /// Web page to fetch and index
    #[arg(long)]
    url: Option<String>,

    /// Label stored with every chunk
    #[arg(long)]
    label: Option<String>,
}

impl SourceArgs {
    fn into_request(self) -> AddRequest {
        let mut request = AddRequest::new();
        if let Some(text) = self.text {
            request = request.text(text);
        }
        if let Some(file) = self.file {
            request = request.file(file);
        }
        if let Some(url) = self.url {
            request = request.url(url);
        }
        if let Some(label) = self.label {
            request = request.label(label);
        }
        request
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum BackendFlag {
    Local,
    Openai,
}

impl BackendFlag {
    const fn as_domain(self) -> Backend {
        match self {
            Self::Local => Backend::Local,
            Self::Openai => Backend::OpenAi,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Index the given sources and print the nearest chunks to a query
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// Query text
        #[arg(long)]
        query: String,

        /// Number of results
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Only return chunks carrying this label
        #[arg(long)]
        filter_label: Option<String>,
    },

    /// Index the given sources, retrieve context, and ask the LLM
    Ask {
        #[command(flatten)]
        source: SourceArgs,

        /// Question to answer from the indexed context
        #[arg(long)]
        question: String,

        /// Number of context chunks to retrieve
        #[arg(long, default_value_t = 3)]
        top: usize,

        /// LLM backend to dispatch to
        #[arg(long, value_enum, default_value = "local")]
        backend: BackendFlag,

        /// Stream the completion as JSON lines instead of waiting
        #[arg(long)]
        stream: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search {
            source,
            query,
            top,
            filter_label,
        } => search(config, source, &query, top, filter_label.as_deref()).await,
        Commands::Ask {
            source,
            question,
            top,
            backend,
            stream,
        } => ask(config, source, &question, top, backend.as_domain(), stream).await,
    }
}

async fn build_index(config: &AppConfig, source: SourceArgs) -> Result<RagIndex> {
    let index_config = config.index.clone();
    let embedder = Arc::new(HashEmbedder::new(
        config.embedding_dimension(),
        index_config.precision,
    ));

    let mut index = RagIndex::new(index_config, embedder)
        .await
        .context("failed to build index")?;
    index
        .add(source.into_request())
        .await
        .context("failed to ingest sources")?;
    Ok(index)
}

async fn search(
    config: AppConfig,
    source: SourceArgs,
    query: &str,
    top: usize,
    filter_label: Option<&str>,
) -> Result<()> {
    let index = build_index(&config, source).await?;

    let ids = match filter_label {
        Some(label) => index.search_labeled(query, label, top).await?,
        None => index.search(query, top).await?,
    };

    let hits: Vec<SearchHit> = ids
        .into_iter()
        .map(|id| {
            let chunk = index.retrieve(id)?;
            Ok(SearchHit {
                id,
                label: chunk.label.clone(),
                text: chunk.text.clone(),
            })
        })
        .collect::<Result<_>>()?;

    println!("{}", serde_json::to_string_pretty(&hits)?);
    Ok(())
}

async fn ask(
    config: AppConfig,
    source: SourceArgs,
    question: &str,
    top: usize,
    backend: Backend,
    stream: bool,
) -> Result<()> {
    let index = build_index(&config, source).await?;

    let ids = index.search(question, top).await?;
    let context: Vec<&str> = ids
        .iter()
        .map(|&id| index.retrieve(id).map(|chunk| chunk.text.as_str()))
        .collect::<ragnote_vector_store::Result<_>>()?;

    let template = answer_template();
    let request = QueryRequest::new()
        .template(template)
        .var("context", context.join("\n"))
        .var("question", question)
        .backend(backend);

    let driver = Driver::new(config.driver);

    if stream {
        let mut rx = driver.query_stream(&request).await?;
        while let Some(chunk) = rx.recv().await {
            println!("{}", serde_json::to_string(&chunk?)?);
        }
    } else {
        let response = driver.query(&request).await?;
        println!("{}", serde_json::to_string(&response)?);
    }

    Ok(())
}

fn answer_template() -> Template {
    Template::new(&[
        Message::new(
            Role::System,
            "Answer using only the provided context. Say so when the context is not enough.",
        ),
        Message::new(Role::User, "Context:\n{context}"),
        Message::new(Role::User, "Question: {question}"),
    ])
}
