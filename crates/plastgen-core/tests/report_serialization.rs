use plastgen_core::{RunReport, TableCounts};

#[test]
fn run_report_round_trips_through_json() {
    let report = RunReport {
        run_id: "c0ffee".to_string(),
        seed: 42,
        records: 10,
        elapsed_ms: 12,
        counts: TableCounts {
            persons: 20,
            employees: 10,
            natural_buyers: 10,
            legal_buyers: 4,
            products: 20,
            base_products: 10,
            quoted_products: 10,
            raw_materials: 10,
            batches: 10,
            sales: 10,
            represents: 4,
            contains: 10,
            produces: 10,
            requires: 10,
            requests: 10,
        },
        legal_representation_events: 4,
        quoted_sale_events: 6,
    };

    let json = serde_json::to_string(&report).expect("serialize");
    let parsed: RunReport = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed.counts, report.counts);
    assert_eq!(parsed.records, report.records);
    assert_eq!(parsed.seed, report.seed);
}
