//! Définition et implémentation de la commande de conversion
//!
//! Une seule commande : lire un extrait BEV, joindre les tables de
//! référence en mémoire, reprojeter les coordonnées vers la cible et
//! écrire la table de sortie.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use adressregister::AddressReader;

use crate::dataset::Dataset;
use crate::pipeline::{self, ReferenceData};
use crate::report::RunReport;
use crate::reproject::ReprojectorSet;
use crate::writer::OutputWriter;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Directory holding the BEV extract (ADRESSE.csv and reference tables)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (défaut : out.csv dans le répertoire d'entrée)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target EPSG code (31287, 4326, 3857, or any code PROJ resolves)
    #[arg(short, long, default_value_t = 31287)]
    pub target: u32,

    /// Coordinate precision (decimal places)
    #[arg(long, default_value_t = 6)]
    pub decimals: u8,

    /// PROJ resource directory (défaut : env PROJ_LIB)
    #[arg(long)]
    pub proj_data: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Exécute la commande convert
pub fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let started_at = Instant::now();

    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    let proj_data = args
        .proj_data
        .or_else(|| std::env::var_os("PROJ_LIB").map(PathBuf::from));

    println!("=== Convert BEV address data ===");
    println!("Input: {}", args.input.display());
    println!("Output: {}", output.display());
    println!("Target CRS: EPSG:{}", args.target);
    println!("Coordinate precision: {} decimals", args.decimals);
    if let Some(dir) = &proj_data {
        println!("PROJ data: {}", dir.display());
    }

    // Tout ce qui peut échouer d'emblée passe avant la création de la sortie
    let dataset = Dataset::locate(&args.input)?;
    let refs = ReferenceData::load(&dataset)?;

    let reprojector = ReprojectorSet::for_target(args.target, proj_data.as_deref())?;
    println!("Reprojection: {}", reprojector.description());

    let mut reader = AddressReader::from_path(&dataset.adresse)
        .with_context(|| format!("Failed to open {}", dataset.adresse.display()))?;
    let mut writer = OutputWriter::create(&output, args.target, args.decimals)?;
    let mut report = RunReport::new(args.target);

    pipeline::run(&mut reader, &refs, &reprojector, &mut writer, &mut report)?;
    writer.finish()?;

    report.set_duration(started_at.elapsed());
    report.finalize();
    report.display();

    if let Some(path) = &args.report {
        report.save_to_file(path)?;
        info!("Report written to {}", path.display());
    }

    info!("{}", report.summary());

    Ok(())
}

/// Sortie par défaut : « out.csv » dans le répertoire d'entrée
fn default_output(input: &Path) -> PathBuf {
    input.join("out.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_in_input_directory() {
        assert_eq!(
            default_output(Path::new("/data/extract")),
            Path::new("/data/extract/out.csv")
        );
        assert_eq!(default_output(Path::new(".")), Path::new("./out.csv"));
    }
}
