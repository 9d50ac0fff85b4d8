/**
 * Wishlist CLI Entry Point
 *
 * Drives the wishlist store against a file-backed key-value storage, so the
 * same persistence, identity and feedback paths as the browser build can be
 * exercised from a terminal.
 */

#[cfg(feature = "cli")]
mod args;
#[cfg(feature = "cli")]
mod commands;

#[cfg(feature = "cli")]
fn main() -> Result<std::process::ExitCode, Box<dyn std::error::Error>> {
    use clap::Parser;
    use std::process::ExitCode;

    // Logs go to stderr so command output stays clean
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_writer(std::io::stderr)
        .init();

    let cli = args::Cli::parse();

    let config = match std::env::var_os("WISHLIST_CONFIG") {
        Some(path) => storefront::shared::WishlistConfig::load(path)?,
        None => storefront::shared::WishlistConfig::from_env()?,
    };
    tracing::debug!(?config, "[STARTUP] Configuration loaded");

    if commands::run(cli.command, config)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("The wishlist CLI requires the 'cli' feature to be enabled.");
    eprintln!("Run with: cargo run --bin wishlist --features cli");
    std::process::exit(1);
}
