use ini_diff::{DiffCategory, DiffConfig, Difference, ReportGroup, Side};

mod common;
use common::{categories, open_fixture};

#[test]
fn fixture_against_itself_is_clean() {
    let a = open_fixture("SBC1", "sbc_primary.ini");
    let b = open_fixture("SBC2", "sbc_primary.ini");
    assert!(a.diff(&b, &DiffConfig::default()).is_empty());
}

#[test]
fn primary_versus_dr_fixture() {
    let primary = open_fixture("SBC1", "sbc_primary.ini");
    let dr = open_fixture("SBC2", "sbc_dr.ini");
    let report = primary.diff(&dr, &DiffConfig::default());

    assert_eq!(
        report.sections.keys().collect::<Vec<_>>(),
        vec![
            "General",
            "SYSTEM Params",
            "IPGroup",
            "ProxySet",
            "MessageManipulations"
        ]
    );
    assert_eq!(report.difference_count(), 9);

    assert_eq!(
        categories(&report, "General"),
        vec![DiffCategory::SectionOnlyInA, DiffCategory::SectionOnlyInB]
    );
    assert_eq!(
        categories(&report, "SYSTEM Params"),
        vec![
            DiffCategory::KeyOnlyInA,
            DiffCategory::KeyOnlyInB,
            DiffCategory::ValueMismatch
        ]
    );

    let [Difference::RowFieldMismatch {
        index_a, changes, ..
    }] = report.differences("IPGroup")
    else {
        panic!("IPGroup: {:?}", report.differences("IPGroup"));
    };
    assert_eq!(index_a, "1");
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].property, "ProxySetName");
    assert_eq!(changes[0].value_b.as_deref(), Some("\"ITSP_Proxy_DR\""));

    assert_eq!(
        report.differences("ProxySet"),
        [
            Difference::RowCountMismatch { rows_a: 3, rows_b: 2 },
            Difference::RowOnlyInA {
                index: "1".into(),
                display: Some("\"ITSP_Proxy\"".into()),
            },
        ]
    );

    assert_eq!(
        report.differences("MessageManipulations"),
        [Difference::TableEmptyVsNonEmpty {
            empty_side: Side::A,
            rows: 2
        }]
    );
}

#[test]
fn grouping_and_counts_cover_the_fixture_report() {
    let primary = open_fixture("SBC1", "sbc_primary.ini");
    let dr = open_fixture("SBC2", "sbc_dr.ini");
    let report = primary.diff(&dr, &DiffConfig::default());

    let groups: Vec<_> = report
        .grouped("SYSTEM Params")
        .into_iter()
        .map(|(g, diffs)| (g, diffs.len()))
        .collect();
    assert_eq!(
        groups,
        vec![
            (ReportGroup::MissingParameters, 2),
            (ReportGroup::ValueMismatches, 1)
        ]
    );

    let total: usize = report.counts_by_category().iter().map(|(_, n)| n).sum();
    assert_eq!(total, report.difference_count());
}

#[test]
fn report_serializes_sections_in_order() {
    let primary = open_fixture("SBC1", "sbc_primary.ini");
    let dr = open_fixture("SBC2", "sbc_dr.ini");
    let report = primary.diff(&dr, &DiffConfig::default());

    let json = serde_json::to_string(&report).unwrap();
    let general = json.find("\"General\"").unwrap();
    let system = json.find("\"SYSTEM Params\"").unwrap();
    let proxy = json.find("\"ProxySet\"").unwrap();
    assert!(general < system && system < proxy);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["label_a"], "SBC1");
    assert_eq!(value["sections"]["ProxySet"][1]["kind"], "RowOnlyInA");
}
