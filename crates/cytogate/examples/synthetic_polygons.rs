//! Build a polygon set for a synthetic two-population sample and print
//! per-budget ring areas.
//!
//! Run: cargo run -p cytogate --example synthetic_polygons

use cytogate::api::*;
use cytogate::Vec2;

fn main() {
    let blasts = draw_event_cloud(
        CloudCfg {
            n_points: 3000,
            center: Vec2::new(650.0, 420.0),
            outlier_frac: 0.01,
            ..CloudCfg::default()
        },
        ReplayToken { seed: 2024, index: 0 },
    );
    let events = EventTable::from_columns(vec![
        ("CD45", blasts.iter().map(|p| p.x).collect::<Vec<_>>()),
        ("SSC-A", blasts.iter().map(|p| p.y).collect()),
    ])
    .expect("aligned columns");
    let labels = LabelTable::from_masks(vec![("Blasts", vec![true; blasts.len()])])
        .expect("single column");
    let sample = InMemorySample::new("synthetic", events, labels);

    let defs = vec![GateDefinition::new("Blasts", "Blasts", "CD45+", "CD45", "SSC-A")];
    for (label, cfg) in [
        ("raw", PipelineCfg::new(defs.clone())),
        (
            "mad",
            PipelineCfg::new(defs.clone()).with_classifier(MadClassifier::default()),
        ),
    ] {
        let cfg = cfg.with_polygon_points(vec![6, 20, 60]);
        let gates = sample.convex_gates(&cfg).expect("valid sample");
        let hull = &gates[0].polygon;
        println!("{label}: hull vertices={} area={:.2}", hull.len(), polygon_area(hull));
        for (budget, bucket) in sample.polygon_gates(&cfg).expect("valid budgets") {
            println!("  budget={budget:>3} area={:.2}", polygon_area(&bucket["Blasts"]));
        }
    }
}
