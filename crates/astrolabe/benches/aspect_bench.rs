use astrolabe::aspects::{classify, AspectCalculator};
use astrolabe::ephemeris::RawPosition;
use astrolabe::positions::{Coordinate, PlanetPositions};
use astrolabe::Planet;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn planet(planet: Planet, longitude: f64) -> Coordinate {
    Coordinate::from_raw(
        planet.into(),
        RawPosition {
            longitude,
            latitude: 0.0,
            distance: 1.0,
            speed: 1.0,
        },
    )
    .unwrap()
}

fn planets(offset: f64) -> PlanetPositions {
    let lon = |i: f64| offset + i * 30.0;
    PlanetPositions {
        sun: planet(Planet::Sun, lon(0.0)),
        moon: planet(Planet::Moon, lon(1.0)),
        mercury: planet(Planet::Mercury, lon(2.0)),
        venus: planet(Planet::Venus, lon(3.0)),
        mars: planet(Planet::Mars, lon(4.0)),
        jupiter: planet(Planet::Jupiter, lon(5.0)),
        saturn: planet(Planet::Saturn, lon(6.0)),
        uranus: planet(Planet::Uranus, lon(7.0)),
        neptune: planet(Planet::Neptune, lon(8.0)),
        pluto: planet(Planet::Pluto, lon(9.0)),
    }
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| classify(black_box(100.0), black_box(218.5), black_box(8.0)))
    });
}

fn bench_chart_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::default();
    let natal = planets(0.0);

    c.bench_function("chart_aspects", |b| {
        b.iter(|| calculator.within(black_box(&natal)))
    });
}

fn bench_transit_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::default();
    let natal = planets(0.0);
    let transit = planets(17.0);

    c.bench_function("transit_aspects", |b| {
        b.iter(|| calculator.between(black_box(&transit), black_box(&natal)))
    });
}

criterion_group!(benches, bench_classify, bench_chart_aspects, bench_transit_aspects);
criterion_main!(benches);
