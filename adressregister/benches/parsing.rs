//! Benchmarks pour la lecture de l'extrait d'adresses

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use adressregister::hausnummer::assemble_hausnummer;
use adressregister::reader::AddressReader;
use adressregister::types::AddressRecord;

const HEADER: &str = "ADRCD;GKZ;OKZ;PLZ;SKZ;ZAEHLSPRENGEL;HAUSNRTEXT;HAUSNRZAHL1;HAUSNRBUCHSTABE1;HAUSNRVERBINDUNG1;HAUSNRZAHL2;HAUSNRBUCHSTABE2;HAUSNRBEREICH;GNRADRESSE;HOFNAME;RW;HW;EPSG;QUELLADRESSE;BESTIMMUNGSART";

/// Construit une table ADRESSE.csv synthétique de `rows` lignes
fn synthetic_table(rows: usize) -> String {
    let mut out = String::with_capacity(rows * 96);
    out.push_str(HEADER);
    out.push('\n');
    for i in 0..rows {
        let epsg = match i % 3 {
            0 => 31254,
            1 => 31255,
            _ => 31256,
        };
        out.push_str(&format!(
            "\"{}\";\"10101\";\"17223\";\"1010\";\"1001\";\"003\";\"\";\"{}\";\"A\";\"/\";\"{}\";\"\";\"\";\"0\";\"\";\"{:.2}\";\"{:.2}\";\"{}\";\"BEV\";\"G\"\n",
            1_000_000 + i,
            i % 200 + 1,
            i % 200 + 3,
            -40_000.0 + (i % 100_000) as f64,
            250_000.0 + (i % 150_000) as f64,
            epsg,
        ));
    }
    out
}

fn bench_read_stream(c: &mut Criterion) {
    let table = synthetic_table(10_000);

    let mut group = c.benchmark_group("read_stream");
    group.throughput(Throughput::Bytes(table.len() as u64));

    group.bench_function("10k_records", |b| {
        b.iter(|| {
            let mut reader = AddressReader::from_reader(black_box(table.as_bytes()));
            let mut with_coord = 0usize;
            while let Some(next) = reader.next_record() {
                let record = next.unwrap();
                if record.coord.is_some() {
                    with_coord += 1;
                }
            }
            black_box(with_coord)
        })
    });

    group.finish();
}

fn bench_assemble_hausnummer(c: &mut Criterion) {
    let records: Vec<AddressRecord> = (0..1_000)
        .map(|i| AddressRecord {
            hausnr_text: if i % 7 == 0 { "Objekt 5".into() } else { String::new() },
            hausnr_zahl1: Some(i % 200 + 1),
            hausnr_buchstabe1: if i % 3 == 0 { "A".into() } else { String::new() },
            hausnr_verbindung1: if i % 5 == 0 { "/".into() } else { String::new() },
            hausnr_zahl2: if i % 5 == 0 { Some(i % 200 + 3) } else { None },
            hausnr_buchstabe2: String::new(),
            ..Default::default()
        })
        .collect();

    let mut group = c.benchmark_group("assemble_hausnummer");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("1k_records", |b| {
        b.iter(|| {
            let total_len: usize = records
                .iter()
                .map(|record| assemble_hausnummer(black_box(record)).len())
                .sum();
            black_box(total_len)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_read_stream, bench_assemble_hausnummer);
criterion_main!(benches);
