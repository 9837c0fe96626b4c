//! Passe de conversion
//!
//! Lit le flux d'adresses, joint les tables de référence en mémoire,
//! reprojette les coordonnées et écrit la table de sortie. Les erreurs
//! portées par une seule ligne sont comptées et journalisées sans
//! interrompre la passe ; tout le reste est fatal.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use adressregister::{
    assemble_hausnummer, load_name_map, load_parcel_map, AddressReader, ParcelMap,
};

use crate::dataset::Dataset;
use crate::report::RunReport;
use crate::reproject::CoordReproject;
use crate::writer::{OutputRecord, OutputWriter};

/// Cadence des traces de progression, en lignes lues
const PROGRESS_EVERY: u64 = 100_000;

/// Tables de référence chargées en mémoire
///
/// Les clés sont les codes tels qu'ils figurent dans ADRESSE.csv (GKZ,
/// OKZ, SKZ, ADRCD), les valeurs les libellés à reporter en sortie.
pub struct ReferenceData {
    pub streets: HashMap<String, String>,
    pub settlements: HashMap<String, String>,
    pub municipalities: HashMap<String, String>,
    pub parcels: ParcelMap,
}

impl ReferenceData {
    /// Charge les tables de référence d'un extrait
    ///
    /// Les trois tables de noms sont obligatoires, la table des parcelles
    /// manquante donne simplement une carte vide.
    pub fn load(dataset: &Dataset) -> Result<Self> {
        let streets = load_name_map(&dataset.strasse, 0, 1)
            .with_context(|| format!("Failed to load {}", dataset.strasse.display()))?;
        let settlements = load_name_map(&dataset.ortschaft, 0, 1)
            .with_context(|| format!("Failed to load {}", dataset.ortschaft.display()))?;
        let municipalities = load_name_map(&dataset.gemeinde, 0, 1)
            .with_context(|| format!("Failed to load {}", dataset.gemeinde.display()))?;

        let parcels = match &dataset.parzellen {
            Some(path) => load_parcel_map(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ParcelMap::default(),
        };

        info!(
            "Reference tables: {} streets, {} settlements, {} municipalities, {} parcels",
            streets.len(),
            settlements.len(),
            municipalities.len(),
            parcels.len()
        );

        Ok(Self {
            streets,
            settlements,
            municipalities,
            parcels,
        })
    }
}

/// Libellé associé à un code, vide quand le code est inconnu
fn resolve<'a>(map: &'a HashMap<String, String>, key: &str) -> &'a str {
    map.get(key).map(String::as_str).unwrap_or("")
}

/// Déroule la passe complète sur un flux d'adresses
///
/// Une ligne sans coordonnées est sautée, une ligne en erreur (analyse,
/// code source inconnu, reprojection) est comptée puis ignorée. Une
/// erreur d'entrée-sortie ou d'écriture interrompt la passe.
pub fn run<R: Read>(
    reader: &mut AddressReader<R>,
    refs: &ReferenceData,
    reprojector: &dyn CoordReproject,
    writer: &mut OutputWriter,
    report: &mut RunReport,
) -> Result<()> {
    report.parcel_duplicates = refs.parcels.duplicates;

    while let Some(next) = reader.next_record() {
        report.record_line();

        let record = match next {
            Ok(record) => record,
            Err(e) if e.is_record_scoped() => {
                warn!("{e}");
                report.record_error();
                continue;
            }
            Err(e) => return Err(e).context("Address stream failed"),
        };

        let Some(coord) = record.coord else {
            debug!(line = record.line, adrcd = %record.adrcd, "No coordinates, skipped");
            report.record_skip();
            continue;
        };

        let coord = match reprojector.reproject(&record.epsg, coord) {
            Ok(coord) => coord,
            Err(e) => {
                warn!(line = record.line, adrcd = %record.adrcd, "{e}");
                report.record_error();
                continue;
            }
        };

        let hausnummer = assemble_hausnummer(&record);
        let (kgnr, gnr) = match refs.parcels.get(&record.adrcd) {
            Some(parcel) => (parcel.kgnr.clone(), parcel.gnr.clone()),
            None => (String::new(), String::new()),
        };

        let out = OutputRecord {
            gemeindename: resolve(&refs.municipalities, &record.gkz).to_string(),
            ortsname: resolve(&refs.settlements, &record.okz).to_string(),
            strassenname: resolve(&refs.streets, &record.skz).to_string(),
            adrcd: record.adrcd,
            gkz: record.gkz,
            kgnr,
            gnr,
            plz: record.plz,
            hausnummer,
            x: coord.x,
            y: coord.y,
        };

        writer
            .write_record(&out)
            .context("Failed to write output record")?;
        report.record_written();

        if report.lines_read % PROGRESS_EVERY == 0 {
            info!("{} address lines processed", report.lines_read);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::ReprojectError;
    use geo::Coord;
    use std::fs;
    use std::path::PathBuf;

    const HEADER: &str = "ADRCD;GKZ;OKZ;PLZ;SKZ;ZAEHLSPRENGEL;HAUSNRTEXT;HAUSNRZAHL1;HAUSNRBUCHSTABE1;HAUSNRVERBINDUNG1;HAUSNRZAHL2;HAUSNRBUCHSTABE2;HAUSNRBEREICH;GNRADRESSE;HOFNAME;RW;HW;EPSG;QUELLADRESSE;BESTIMMUNGSART";

    /// Décale les coordonnées de 50 m, n'accepte que « 31254 »
    struct MockReproject;

    impl CoordReproject for MockReproject {
        fn reproject(
            &self,
            source_epsg: &str,
            coord: Coord,
        ) -> Result<Coord, ReprojectError> {
            if source_epsg == "31254" {
                Ok(Coord {
                    x: coord.x + 50.0,
                    y: coord.y + 50.0,
                })
            } else {
                Err(ReprojectError::UnknownSource(source_epsg.to_string()))
            }
        }
    }

    fn address_row(adrcd: &str, rw: &str, hw: &str, epsg: &str) -> String {
        format!("{adrcd};60101;40301;4020;90001;;;12;;;;;;;;{rw};{hw};{epsg};G;1\n")
    }

    fn test_refs() -> ReferenceData {
        let mut streets = HashMap::new();
        streets.insert("90001".to_string(), "Hauptstraße".to_string());
        let mut settlements = HashMap::new();
        settlements.insert("40301".to_string(), "Linz".to_string());
        let municipalities = HashMap::new();
        ReferenceData {
            streets,
            settlements,
            municipalities,
            parcels: ParcelMap::default(),
        }
    }

    fn run_pipeline(name: &str, rows: &[String]) -> (RunReport, String) {
        let mut table = String::from(HEADER);
        table.push('\n');
        for row in rows {
            table.push_str(row);
        }

        let out_path: PathBuf = std::env::temp_dir().join(format!(
            "bev-pipeline-{}-{}.csv",
            name,
            std::process::id()
        ));

        let mut reader = AddressReader::from_reader(table.as_bytes());
        let mut writer = OutputWriter::create(&out_path, 31287, 6).unwrap();
        let mut report = RunReport::new(31287);
        let refs = test_refs();

        run(&mut reader, &refs, &MockReproject, &mut writer, &mut report).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&out_path).unwrap();
        fs::remove_file(out_path).ok();
        (report, content)
    }

    #[test]
    fn test_record_is_joined_and_reprojected() {
        let rows = vec![address_row("100", "100.5", "200.5", "31254")];
        let (report, content) = run_pipeline("joined", &rows);

        assert_eq!(report.rows_written, 1);
        let row = content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "100;60101;;;;4020;Linz;Hauptstraße;12;150.500000;250.500000"
        );
    }

    #[test]
    fn test_record_without_coords_is_skipped() {
        let rows = vec![
            address_row("100", "100.5", "200.5", "31254"),
            address_row("101", "", "", "31254"),
        ];
        let (report, content) = run_pipeline("skip", &rows);

        assert_eq!(report.lines_read, 2);
        assert_eq!(report.rows_written, 1);
        assert_eq!(report.skipped_no_coord, 1);
        assert_eq!(report.record_errors, 0);
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_unknown_source_code_is_counted_not_fatal() {
        let rows = vec![
            address_row("100", "1.0", "2.0", "99999"),
            address_row("101", "100.0", "200.0", "31254"),
        ];
        let (report, content) = run_pipeline("unknown-source", &rows);

        assert_eq!(report.record_errors, 1);
        assert_eq!(report.rows_written, 1);
        assert!(content.contains("\n101;"));
    }

    #[test]
    fn test_unknown_municipality_yields_empty_field() {
        let rows = vec![address_row("100", "1.0", "2.0", "31254")];
        let (_, content) = run_pipeline("unknown-gkz", &rows);

        // GKZ 60101 absent de la table des communes : champ vide
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with("100;60101;;"), "{row}");
    }

    #[test]
    fn test_parcel_join_fills_kgnr_and_gnr() {
        let mut refs = test_refs();
        let parcel_table = "ADRCD;KGNR;GNR\n100;01004;123/4\n";
        let parcel_path = std::env::temp_dir().join(format!(
            "bev-pipeline-parcels-{}.csv",
            std::process::id()
        ));
        fs::write(&parcel_path, parcel_table).unwrap();
        refs.parcels = load_parcel_map(&parcel_path).unwrap();
        fs::remove_file(&parcel_path).ok();

        let mut table = String::from(HEADER);
        table.push('\n');
        table.push_str(&address_row("100", "1.0", "2.0", "31254"));

        let out_path = std::env::temp_dir().join(format!(
            "bev-pipeline-parcel-out-{}.csv",
            std::process::id()
        ));
        let mut reader = AddressReader::from_reader(table.as_bytes());
        let mut writer = OutputWriter::create(&out_path, 31287, 6).unwrap();
        let mut report = RunReport::new(31287);

        run(&mut reader, &refs, &MockReproject, &mut writer, &mut report).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&out_path).unwrap();
        fs::remove_file(out_path).ok();
        let row = content.lines().nth(1).unwrap();
        assert!(row.starts_with("100;60101;;01004;123/4;"), "{row}");
    }

    #[test]
    fn test_malformed_row_is_counted_and_stream_continues() {
        let rows = vec![
            "1;2;3\n".to_string(),
            address_row("101", "100.0", "200.0", "31254"),
        ];
        let (report, content) = run_pipeline("malformed", &rows);

        assert_eq!(report.record_errors, 1);
        assert_eq!(report.rows_written, 1);
        assert!(content.contains("\n101;"));
    }

    #[test]
    fn test_resolve_falls_back_to_empty() {
        let mut map = HashMap::new();
        map.insert("1".to_string(), "Wien".to_string());
        assert_eq!(resolve(&map, "1"), "Wien");
        assert_eq!(resolve(&map, "2"), "");
    }
}
