//! Native preview tool. Browser builds use the library's `mount` instead.

#[cfg(not(target_arch = "wasm32"))]
use gardn_embed::orchestrator::BindingOutcome;
#[cfg(not(target_arch = "wasm32"))]
use gardn_embed::snapshot::render_page;
#[cfg(not(target_arch = "wasm32"))]
use gardn_embed::{MemoryDocument, Orchestrator, ReqwestClient, WidgetConfig, PLANT_MARKER, ROLL_MARKER};
#[cfg(not(target_arch = "wasm32"))]
use std::{env, process};
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: gardn-render <username|roll:username>...");
        eprintln!();
        eprintln!("Fetches live widget data and prints the rendered page to stdout.");
        eprintln!("The API host is read from PUBLIC_BASE_URL (default https://gardn.dev).");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  gardn-render alice");
        eprintln!("  gardn-render alice roll:alice");
        process::exit(1);
    }

    let doc = MemoryDocument::new();
    for arg in &args {
        match arg.strip_prefix("roll:") {
            Some(username) => doc.add_host(&[(ROLL_MARKER, username)]),
            None => doc.add_host(&[(PLANT_MARKER, arg.as_str())]),
        };
    }

    let config = WidgetConfig::from_env();
    let client = ReqwestClient::new();
    let reports = Orchestrator::new(&doc, &client, &config).run().await;

    let mut exit_code = 0;
    for report in &reports {
        match &report.outcome {
            BindingOutcome::Rendered => {
                eprintln!("✓ {:?} {}", report.kind, report.username);
            }
            BindingOutcome::Fallback(e) => {
                eprintln!("✗ {:?} {} fell back: {}", report.kind, report.username, e);
                exit_code = 2;
            }
        }
    }

    match render_page(&doc, "Gardn widget preview") {
        Ok(page) => print!("{}", page),
        Err(e) => {
            eprintln!("failed to render page: {}", e);
            exit_code = 1;
        }
    }

    process::exit(exit_code);
}
