use astrolabe::{Chart, ChartRequest, Ephemeris, EphemerisConfig, GeoLocation, HouseSystem};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn bench_house_frame(c: &mut Criterion) {
    let ephemeris = EphemerisConfig::from_env().install().unwrap();
    let location = GeoLocation::new(37.508, -122.285).unwrap();
    let dt = Utc.with_ymd_and_hms(2019, 12, 14, 13, 39, 0).unwrap();

    c.bench_function("armc_and_obliquity", |b| {
        b.iter(|| ephemeris.armc_and_obliquity(black_box(dt), black_box(location.lon)))
    });

    for system in [HouseSystem::Placidus, HouseSystem::Koch, HouseSystem::Campanus] {
        c.bench_function(&format!("house_cusps_{system}"), |b| {
            b.iter(|| ephemeris.house_cusps(black_box(dt), black_box(&location), system))
        });
    }

    let (armc, eps) = ephemeris.armc_and_obliquity(dt, location.lon).unwrap();
    c.bench_function("house_position_placidus", |b| {
        b.iter(|| {
            ephemeris.house_position(
                black_box(armc),
                black_box(location.lat),
                black_box(eps),
                HouseSystem::Placidus,
                black_box(262.4),
            )
        })
    });
}

fn bench_chart(c: &mut Criterion) {
    let ephemeris = Arc::new(EphemerisConfig::from_env().install().unwrap());
    let request = ChartRequest::new(
        Utc.with_ymd_and_hms(2019, 12, 14, 13, 39, 0).unwrap(),
        GeoLocation::new(40.7128, -74.0060).unwrap(),
    );

    c.bench_function("chart_build", |b| {
        b.iter(|| Chart::build(ephemeris.clone(), black_box(request.clone())))
    });
}

criterion_group!(benches, bench_house_frame, bench_chart);
criterion_main!(benches);
