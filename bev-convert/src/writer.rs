//! Écriture de la table de sortie
//!
//! Une seule table délimitée par « ; », en-tête compris. L'écriture passe
//! par un fichier de travail suffixé « .part », renommé vers le nom final
//! uniquement quand la passe s'achève : le nom demandé ne désigne jamais
//! un fichier partiel.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ligne de sortie prête à sérialiser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRecord {
    pub adrcd: String,
    pub gkz: String,
    pub gemeindename: String,
    pub kgnr: String,
    pub gnr: String,
    pub plz: String,
    pub ortsname: String,
    pub strassenname: String,
    pub hausnummer: String,
    /// Coordonnées déjà exprimées dans la cible
    pub x: f64,
    pub y: f64,
}

/// Écrivain de la table de sortie
pub struct OutputWriter {
    writer: csv::Writer<BufWriter<File>>,
    path: PathBuf,
    part_path: PathBuf,
    decimals: usize,
}

impl OutputWriter {
    /// Crée le fichier de travail et écrit l'en-tête
    ///
    /// Les colonnes de coordonnées portent la cible dans leur libellé
    /// (« x-EPSG-31287 »), le reste de l'en-tête est fixe.
    pub fn create(path: &Path, target_epsg: u32, decimals: u8) -> Result<Self> {
        let part_path = part_path_for(path);
        let file = File::create(&part_path)
            .with_context(|| format!("Failed to create {}", part_path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(BufWriter::new(file));

        let x_label = format!("x-EPSG-{target_epsg}");
        let y_label = format!("y-EPSG-{target_epsg}");
        writer
            .write_record([
                "ADRCD",
                "GKZ",
                "GEMEINDENAME",
                "KGNR",
                "GNR",
                "PLZ",
                "ORTSNAME",
                "STRASSENNAME",
                "HAUSNUMMER",
                x_label.as_str(),
                y_label.as_str(),
            ])
            .context("Failed to write output header")?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            part_path,
            decimals: decimals as usize,
        })
    }

    /// Écrit une ligne, coordonnées à précision fixe
    pub fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        let x = format!("{:.prec$}", record.x, prec = self.decimals);
        let y = format!("{:.prec$}", record.y, prec = self.decimals);
        self.writer.write_record([
            record.adrcd.as_str(),
            record.gkz.as_str(),
            record.gemeindename.as_str(),
            record.kgnr.as_str(),
            record.gnr.as_str(),
            record.plz.as_str(),
            record.ortsname.as_str(),
            record.strassenname.as_str(),
            record.hausnummer.as_str(),
            x.as_str(),
            y.as_str(),
        ])?;
        Ok(())
    }

    /// Scelle la sortie : vide les tampons puis renomme vers le nom final
    pub fn finish(self) -> Result<()> {
        let Self {
            mut writer,
            path,
            part_path,
            ..
        } = self;

        writer.flush().context("Failed to flush output")?;
        drop(writer);

        fs::rename(&part_path, &path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                part_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }
}

/// Nom du fichier de travail : « out.csv » → « out.csv.part »
fn part_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "out.csv".into());
    name.push(".part");
    path.with_file_name(name)
}
