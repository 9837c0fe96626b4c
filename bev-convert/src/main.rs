//! Point d'entrée CLI pour bev-convert

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;
mod dataset;
mod pipeline;
mod report;
mod reproject;
mod writer;

use cli::ConvertArgs;

/// Convertir l'extrait d'adresses du BEV en une table exploitable
#[derive(Parser)]
#[command(name = "bev-convert")]
#[command(author, version)]
#[command(about = "Convertir l'extrait d'adresses du BEV (Adresse Relationale Tabellen) en une table unique reprojetée")]
#[command(
    long_about = "Joint ADRESSE.csv aux tables de référence (rues, localités, communes, parcelles), \
reprojette les coordonnées Gauss-Krüger vers le CRS cible et écrit une table CSV unique.\n\n\
Cible par défaut : EPSG:31287 (MGI / Austria Lambert)."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    cli::cmd_convert(cli.convert)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
