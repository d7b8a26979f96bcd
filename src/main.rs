use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use search_widget::config::CONFIG;
use search_widget::view::{OutputFormat, TerminalView};
use search_widget::{HttpSearchClient, SearchWidget};

#[derive(Parser, Debug)]
#[command(name = "search-widget", about = "Query a /search endpoint and list the hits")]
struct Cli {
    /// Search endpoint URL (overrides SEARCH_URL)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (overrides SEARCH_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the results container as HTML instead of plain text
    #[arg(long)]
    html: bool,

    /// Log at debug level, including raw API responses
    #[arg(short, long)]
    verbose: bool,

    /// Run a single search; without it queries are read from stdin, one per line
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber (also picks up reqwest's log records)
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = CONFIG.with_overrides(cli.url, cli.timeout);
    let client = HttpSearchClient::from_config(&config)?;
    tracing::info!(url = %client.url(), "search endpoint");

    let format = if cli.html {
        OutputFormat::Html
    } else {
        OutputFormat::Text
    };
    let widget = SearchWidget::new(TerminalView::new(format), client);

    if let Some(query) = cli.query {
        widget.view().set_query(query);
        widget.on_search_click().await;
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        widget.view().set_query(line);
        let outcome = widget.on_search_click().await;
        tracing::debug!(?outcome, "click handled");
    }
    Ok(())
}
