//! formfill - extract data from scanned documents and fill a web form.

use std::io::{self, BufRead, Write};

use clap::Parser;
use formfill_browser::WebDriverSession;
use formfill_cli::{config, review, Cli, CliError, Result};
use formfill_domain::FormMappingSet;
use formfill_llm::GeminiClient;
use formfill_ocr::TesseractOcr;
use formfill_pipeline::{build_fill_table, DocumentPipeline};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Fail fast on missing OCR binaries before touching any document.
    TesseractOcr::ensure_available()?;
    config::prepare_temp_dir(&cli.temp_dir)?;
    let recognizer = TesseractOcr::new(&cli.temp_dir);

    let mappings = config::load_form_mappings(&cli.config_dir)?;
    let prompts = config::load_prompts(&cli.config_dir)?;
    let api_key = cli
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(CliError::MissingApiKey)?;
    let backend = GeminiClient::new(api_key);

    let pipeline = DocumentPipeline::new(recognizer, backend, prompts);
    let outcome = execute(&cli, &pipeline, &mappings).await;

    if let Err(e) = config::cleanup_temp_dir(&cli.temp_dir) {
        warn!(error = %e, "failed to clean scratch directory");
    }
    outcome
}

async fn execute(
    cli: &Cli,
    pipeline: &DocumentPipeline<TesseractOcr, GeminiClient>,
    mappings: &FormMappingSet,
) -> Result<()> {
    let consolidated = pipeline.run(&cli.documents).await?;
    println!("{}", serde_json::to_string_pretty(&consolidated)?);

    let mapping = mappings.resolve(&cli.form)?;
    let table = build_fill_table(&consolidated, &mapping);

    if cli.skip_fill {
        info!("--skip-fill set, not opening a browser");
        return Ok(());
    }
    if table.is_empty() {
        info!(form = %cli.form, "no consolidated value maps onto this form");
        println!("No extracted value maps onto form '{}'; nothing to fill.", cli.form);
        return Ok(());
    }

    info!(url = mapping.url(), fields = table.len(), "opening browser session");
    let session = WebDriverSession::open(&cli.webdriver_url).await?;
    review::fill_and_review(session, &mapping, &table, wait_for_operator).await?;
    Ok(())
}

/// The form is deliberately never submitted; hold the session open until the
/// operator has reviewed the page.
fn wait_for_operator() -> io::Result<()> {
    println!("The form has been filled but NOT submitted.");
    print!("Review it in the browser, then press Enter to close the session... ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
