//! signbridge: drive the extension protocol against a simulated browser.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use signbridge_core::BridgeConfig;
use signbridge_host::{ConsoleDisplay, Extension, SimulatedBrowser};
use signbridge_inspector::PageSnapshot;
use signbridge_popup::{HttpBackend, Trigger};

fn print_help() {
    println!("signbridge: video sign-language translation bridge");
    println!();
    println!("Usage: signbridge <command>");
    println!();
    println!("Commands:");
    println!("  inspect <page.json>      Run the page inspector on a page snapshot");
    println!("  translate <page.json>    Detect the page's video and request a translation");
    println!("  health                   Check that the translation backend is running");
    println!("  config                   Show the effective configuration");
    println!("  config set <key> <value> Save a setting to signbridge.json");
    println!("                           (backend_url, translate_path, request_timeout_secs)");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  SIGNBRIDGE_CONFIG_DIR            Directory holding signbridge.json");
    println!("  SIGNBRIDGE_BACKEND_URL           Backend base URL (default http://127.0.0.1:8000)");
    println!("  SIGNBRIDGE_REQUEST_TIMEOUT_SECS  Backend request timeout (default: none)");
}

fn load_page(path: &Path) -> anyhow::Result<PageSnapshot> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    PageSnapshot::from_json(&raw)
        .map_err(|e| anyhow::anyhow!("Invalid page snapshot {}: {}", path.display(), e))
}

fn page_arg(args: &[String], command: &str) -> PathBuf {
    match args.get(2) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Usage: signbridge {} <page.json>", command);
            std::process::exit(1);
        }
    }
}

async fn open_extension(config: &BridgeConfig, page: PageSnapshot) -> anyhow::Result<Extension> {
    let backend = HttpBackend::new(config)?;
    info!("Translation endpoint: {}", backend.translate_url());

    let browser = Arc::new(SimulatedBrowser::new());
    browser.open_tab(page);

    let extension = Extension::install(browser, Arc::new(backend), Arc::new(ConsoleDisplay));
    extension.click_icon().await?;
    Ok(extension)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    let config_dir = BridgeConfig::resolve_config_dir();
    let config = BridgeConfig::load(&config_dir);

    match command {
        "inspect" => {
            let page = load_page(&page_arg(&args, "inspect"))?;
            let extension = open_extension(&config, page).await?;
            match extension.inspect_active().await? {
                Some(reply) => println!("{}", serde_json::to_string_pretty(&reply)?),
                None => {
                    eprintln!("No response from page inspector");
                    std::process::exit(1);
                }
            }
        }
        "translate" => {
            let page = load_page(&page_arg(&args, "translate"))?;
            let extension = open_extension(&config, page).await?;
            match extension.start_translation().await {
                Trigger::Completed(status) if status.is_success() => {}
                Trigger::Completed(_) => std::process::exit(2),
                Trigger::Ignored => std::process::exit(3),
            }
        }
        "health" => {
            let backend = HttpBackend::new(&config)?;
            match backend.health().await {
                Ok(health) => println!("{}", health.message),
                Err(e) => {
                    eprintln!("Backend not reachable at {}: {}", config.backend_url, e);
                    std::process::exit(1);
                }
            }
        }
        "config" => match args.get(2).map(String::as_str) {
            None => {
                println!("config file: {}", config.config_path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            Some("set") => {
                let (Some(key), Some(value)) = (args.get(3), args.get(4)) else {
                    eprintln!("Usage: signbridge config set <key> <value>");
                    std::process::exit(1);
                };
                // Environment overrides are not persisted.
                let mut file_config = BridgeConfig::load_file(&config_dir);
                file_config.set(key, value)?;
                file_config.save()?;
                println!("Saved {} to {}", key, file_config.config_path.display());
            }
            Some(other) => {
                eprintln!("Unknown config subcommand: {}", other);
                std::process::exit(1);
            }
        },
        "--help" | "-h" | "help" => print_help(),
        other => {
            eprintln!("Unknown command: {}. Use 'signbridge help' for usage.", other);
            std::process::exit(1);
        }
    }

    Ok(())
}
