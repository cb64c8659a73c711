use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use atmlog_core::extract_rows;
use atmlog_core::logging::structured::LogContext;
use atmlog_core::segmentation::segment_outage;

const OUTAGE_BLOCK: &str = "ATMI
ID01 - Mall Besar
Area: Jaksel
Problem: Listrik mati
Pukul: 14:00
Info: Pak Budi";

const MAINTENANCE_BLOCK: &str = "Preventive Maintenance BRINKS
Tanggal Kunjungan: 14 Oktober 2025
ID ATM: 12345
Lokasi: Indomaret Raya
Waktu Kunjungan: 10.00 WIB
Problem:
* Modem sering restart
Action: Ganti SIM card, Cleaning modem
Status: ATM Online, UP dual link (menggunakan UPS)
Selesai: 11.30 WIB
PIC MT: Andi";

fn repeated(block: &str, n: usize) -> String {
    vec![block; n].join("\n")
}

fn bench_extraction(c: &mut Criterion) {
    let ctx = LogContext::new("bench");
    let today = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
    let outage = repeated(OUTAGE_BLOCK, 20);
    let maintenance = repeated(MAINTENANCE_BLOCK, 20);

    c.bench_function("segment_outage_20_blocks", |b| {
        b.iter(|| segment_outage(black_box(&outage)))
    });
    c.bench_function("extract_rows_outage_20_blocks", |b| {
        b.iter(|| extract_rows(black_box(&outage), today, &ctx))
    });
    c.bench_function("extract_rows_maintenance_20_blocks", |b| {
        b.iter(|| extract_rows(black_box(&maintenance), today, &ctx))
    });
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
