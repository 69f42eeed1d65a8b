use ini_diff::{Section, SectionKind, parse_sections, read_sections};

mod common;
use common::fixture_path;

fn only_section(text: &str) -> Section {
    let mut sections = parse_sections(text);
    assert_eq!(sections.len(), 1, "expected exactly one section: {:?}", sections);
    sections.remove(0)
}

#[test]
fn key_value_section_round_trip() {
    let section = only_section("[S]\nk1 = v\n[\\S]\n");

    assert_eq!(section.name, "S");
    assert_eq!(section.kind(), SectionKind::KeyValue);
    let values = section.as_key_value().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get("k1").map(String::as_str), Some("v"));
}

#[test]
fn table_section_rows_carry_index_and_named_fields() {
    let section = only_section(
        "[T]\nFORMAT Index = Name,Type\nRow 0 = Alice,Admin\nRow 1 = Bob,User\n[\\T]\n",
    );

    assert_eq!(section.kind(), SectionKind::Table);
    let table = section.as_table().unwrap();
    assert_eq!(table.columns, vec!["Index", "Name", "Type"]);
    assert_eq!(table.rows.len(), 2);

    let alice = &table.rows[0];
    assert_eq!(alice.value("Index"), Some("0"));
    assert_eq!(alice.value("Name"), Some("Alice"));
    assert_eq!(alice.value("Type"), Some("Admin"));

    let bob = &table.rows[1];
    assert_eq!(bob.value("Index"), Some("1"));
    assert_eq!(bob.value("Name"), Some("Bob"));
    assert_eq!(bob.value("Type"), Some("User"));
}

#[test]
fn later_duplicate_key_overwrites_in_place() {
    let section = only_section("[S]\na = 1\nb = 2\na = 3\n[\\S]\n");
    let values = section.as_key_value().unwrap();

    assert_eq!(values.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(values.get("a").map(String::as_str), Some("3"));
}

#[test]
fn comments_blank_and_garbage_lines_are_skipped() {
    let text = "\
; header comment
# another comment

[S]
;commented = out
#hashed = out
this line has no separator
   key   =   spaced value   
[\\S]
stray = outside
";
    let section = only_section(text);
    let values = section.as_key_value().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get("key").map(String::as_str), Some("spaced value"));
}

#[test]
fn missing_final_close_marker_still_yields_section() {
    let sections = parse_sections("[A]\nx = 1\n[\\A]\n[B]\ny = 2\n");
    let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(
        sections[1].as_key_value().unwrap().get("y").map(String::as_str),
        Some("2")
    );
}

#[test]
fn open_marker_finalizes_previous_unclosed_section() {
    let sections = parse_sections("[A]\nx = 1\n[B]\ny = 2\n[\\B]\n");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].name, "A");
    assert_eq!(sections[0].as_key_value().unwrap().len(), 1);
}

#[test]
fn lines_outside_sections_are_ignored() {
    let sections = parse_sections("orphan = 1\nRow 0 = a\n[\\Nothing]\n");
    assert!(sections.is_empty());
}

#[test]
fn table_rows_ignore_key_value_shapes_and_comments() {
    let section = only_section(
        "[T]\nFORMAT Index = Name\nnot a row = 1\n;Row 5 = commented\nRow 7 = kept\n[\\T]\n",
    );
    let table = section.as_table().unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].index, "7");
}

#[test]
fn table_without_rows_is_still_a_table() {
    let section = only_section("[T]\nFORMAT Index = Name, Type\n[\\T]\n");
    assert_eq!(section.kind(), SectionKind::Table);
    assert!(section.as_table().unwrap().is_empty());
}

#[test]
fn settings_before_format_are_replaced_by_the_table() {
    let section = only_section("[T]\nstray = 1\nFORMAT Index = Name\nRow 0 = a\n[\\T]\n");
    assert_eq!(section.kind(), SectionKind::Table);
    assert_eq!(section.as_table().unwrap().rows.len(), 1);
}

#[test]
fn second_format_line_resets_rows() {
    let section = only_section(
        "[T]\nFORMAT Index = A\nRow 0 = x\nFORMAT Index = B, C\nRow 1 = y, z\n[\\T]\n",
    );
    let table = section.as_table().unwrap();
    assert_eq!(table.columns, vec!["Index", "B", "C"]);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].value("C"), Some("z"));
}

#[test]
fn index_token_is_kept_verbatim() {
    let section = only_section("[T]\nFORMAT Index = Name\nRow 007 = x\n[\\T]\n");
    assert_eq!(section.as_table().unwrap().rows[0].index, "007");
}

#[test]
fn duplicate_indices_are_kept_for_the_differ_to_flag() {
    let section = only_section("[T]\nFORMAT Index = Name\nRow 0 = a\nRow 0 = b\n[\\T]\n");
    let table = section.as_table().unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.duplicate_indices(), vec!["0"]);
}

#[test]
fn crlf_line_endings_parse_like_lf() {
    let lf = parse_sections("[S]\na = 1\n[\\S]\n");
    let crlf = parse_sections("[S]\r\na = 1\r\n[\\S]\r\n");
    assert_eq!(lf, crlf);
}

#[test]
fn read_sections_parses_fixture() {
    let sections = read_sections(fixture_path("sbc_primary.ini")).expect("fixture readable");
    let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "SYSTEM Params",
            "SIP Params",
            "SNMP Params",
            "IPGroup",
            "ProxySet",
            "MessageManipulations"
        ]
    );
}

#[test]
fn read_sections_tolerates_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.ini");
    std::fs::write(&path, b"[S]\nName = caf\xe9\n[\\S]\n").unwrap();

    let sections = read_sections(&path).expect("lossy decode");
    let value = sections[0].as_key_value().unwrap().get("Name").cloned();
    assert_eq!(value.as_deref(), Some("caf\u{FFFD}"));
}
