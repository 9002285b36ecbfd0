use std::net::SocketAddr;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use poisk_core::{Analyzer, BooleanIndex};
use poisk_server::{loader, serve, SearchContext};
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "poisk-server")]
#[command(about = "In-memory Boolean search over a scraped corpus", long_about = None)]
struct Args {
    /// Corpus snapshot: a JSONL file or a directory of JSONL files
    #[arg(long)]
    corpus: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 9999)]
    port: u16,
    /// Maximum documents returned per query (0 = unbounded)
    #[arg(long, default_value_t = 10)]
    max_responses: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let analyzer = Analyzer::new();
    let mut index = BooleanIndex::with_max_responses(args.max_responses);
    let summary = loader::load_corpus(&args.corpus, &analyzer, &mut index)?;
    info!(
        indexed = summary.indexed,
        skipped = summary.skipped,
        "corpus loaded"
    );

    let stats = index.stats();
    info!(
        documents = stats.total_documents,
        terms = stats.total_terms,
        "index built"
    );
    if let Some((term, size)) = &stats.largest_term {
        info!(term = %term, documents = *size, "largest posting list");
    }
    if let Some((term, size)) = &stats.smallest_term {
        info!(term = %term, documents = *size, "smallest posting list");
    }

    let context = Rc::new(SearchContext {
        index,
        analyzer,
        max_response_count: args.max_responses,
    });

    // Everything, clients included, runs on this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();
    runtime.block_on(local.run_until(async move {
        let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "server listening");

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        let shutdown = async move {
            tokio::select! {
                _ = sigint.recv() => info!("received SIGINT"),
                _ = sigterm.recv() => info!("received SIGTERM"),
            }
        };

        serve(listener, context, shutdown).await
    }))
}
