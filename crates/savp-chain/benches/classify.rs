use criterion::{Criterion, criterion_group, criterion_main};
use savp_chain::classify;
use savp_chain::graph::build_dispositor_graph;
use savp_chain::report::analyze;
use savp_core::chart::{ChartSnapshot, Placement};
use savp_core::config::SavpConfig;
use savp_core::rulership::RulershipScheme;
use savp_core::zodiac::{Body, Sign};
use std::collections::BTreeMap;
use std::hint::black_box;

/// A full ten-body chart spread around the wheel with houses and one
/// retrograde body, so every weighting factor is exercised.
fn full_chart() -> ChartSnapshot {
    let layout = [
        (Body::Sun, Sign::Leo, 12.0, 10),
        (Body::Moon, Sign::Taurus, 3.5, 7),
        (Body::Mercury, Sign::Virgo, 1.2, 11),
        (Body::Venus, Sign::Cancer, 28.0, 9),
        (Body::Mars, Sign::Capricorn, 14.0, 3),
        (Body::Jupiter, Sign::Pisces, 9.0, 5),
        (Body::Saturn, Sign::Aquarius, 22.0, 4),
        (Body::Uranus, Sign::Scorpio, 17.0, 1),
        (Body::Neptune, Sign::Sagittarius, 8.0, 2),
        (Body::Pluto, Sign::Libra, 25.0, 12),
    ];
    let mut chart = ChartSnapshot::new();
    for (body, sign, degree, house) in layout {
        chart.placements.insert(
            body,
            Placement {
                sign,
                degree,
                house: Some(house),
                retrograde: body == Body::Saturn,
            },
        );
    }
    chart
}

fn bench_build_graph(c: &mut Criterion) {
    let map: BTreeMap<Body, Sign> = full_chart().sign_by_body();

    c.bench_function("build_graph_10", |b| {
        b.iter(|| build_dispositor_graph(black_box(&map), RulershipScheme::Modern))
    });
}

fn bench_classify(c: &mut Criterion) {
    let chart = full_chart();
    let graph = build_dispositor_graph(&chart.sign_by_body(), RulershipScheme::Modern).unwrap();
    let aspects = chart.effective_aspects(&SavpConfig::default().aspects);

    c.bench_function("classify_10", |b| {
        b.iter(|| classify(black_box(&graph), black_box(&aspects)))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let chart = full_chart();
    let config = SavpConfig::default();

    c.bench_function("analyze_10", |b| {
        b.iter(|| analyze(black_box(&chart), black_box(&config)))
    });
}

criterion_group!(benches, bench_build_graph, bench_classify, bench_analyze);
criterion_main!(benches);
