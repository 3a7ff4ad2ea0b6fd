use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gdu_calculator::{extract_gdu, DateRange};
use serde_json::{json, Value};

fn season_response(start: NaiveDate, days: i64) -> Value {
    let timestamps: Vec<String> = (0..days)
        .map(|i| format!("{}T0000", (start + Duration::days(i)).format("%Y%m%d")))
        .collect();
    let values: Vec<f64> = (0..days).map(|i| ((i * 7) % 23) as f64 * 0.83).collect();
    json!([{
        "timeIntervals": [timestamps],
        "codes": [{ "dataPerTimeInterval": [{ "data": [values] }] }]
    }])
}

fn bench_extract(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let raw = season_response(start, 365);
    let year = DateRange::validate(start, None, Some(end), end).unwrap();
    let summer = year
        .sub_range(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 8, 31).unwrap(),
        )
        .unwrap();

    c.bench_function("extract_gdu_year", |b| {
        b.iter(|| extract_gdu(black_box(raw.clone()), black_box(&year)))
    });
    c.bench_function("extract_gdu_summer", |b| {
        b.iter(|| extract_gdu(black_box(raw.clone()), black_box(&summer)))
    });

    let table = extract_gdu(raw.clone(), &year).unwrap().unwrap();
    c.bench_function("restrict_summer", |b| {
        b.iter(|| black_box(&table).restrict(black_box(&summer)))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
