use std::fs;

use aideon_hierarchy::HierarchyError;
use aideon_hierarchy::config::{CsvOptions, HierarchyOptions, Quoting, Settings, TextEncoding};
use aideon_hierarchy::flatten::{build_from_paths, build_from_tree};
use aideon_hierarchy::io::{delimited, excel_read, excel_write, json};
use aideon_hierarchy::model::{NodeTable, Timestamp, TreeNode, TreeValue};
use aideon_hierarchy::reconstruct::{reconstruct, reconstruct_forest};
use aideon_hierarchy::sync;
use chrono::{TimeZone, Utc};
use tempfile::tempdir;

fn stamp() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap()
}

fn org_chart() -> TreeValue {
    TreeValue::new("HQ", "Head Office")
        .with_child(
            TreeValue::new("SALES", "Sales, Marketing")
                .with_child(TreeValue::new("EAST", "East \"Region\""))
                .with_child(TreeValue::new("WEST", "West Region")),
        )
        .with_child(TreeValue::new("OPS", "Operations").with_child(TreeValue::leaf("IT")))
        .with_child(TreeValue::new("HR", "Human Resources"))
}

#[test]
fn tree_table_tree_roundtrip_preserves_structure() {
    let tree = org_chart();
    let table = build_from_tree(&tree, &HierarchyOptions::default(), stamp());
    let rebuilt = reconstruct(&table).expect("tree rebuilt");

    assert_eq!(rebuilt.to_value(), tree);
    assert_eq!(rebuilt.id, 1);
    let ids: Vec<u64> = rebuilt.children.iter().map(|child| child.id).collect();
    assert_eq!(ids, vec![2, 5, 7]);
}

#[test]
fn reconstruction_sorts_children_by_order() {
    let mut table = build_from_tree(&org_chart(), &HierarchyOptions::default(), stamp());
    let last = table.nodes.len() - 1;
    // Move HR ahead of SALES without touching row order.
    table.nodes[last].order = 0;

    let rebuilt = reconstruct(&table).expect("tree rebuilt");
    let codes: Vec<&str> = rebuilt
        .children
        .iter()
        .map(|child| child.code.as_str())
        .collect();
    assert_eq!(codes, vec!["HR", "SALES", "OPS"]);
}

#[test]
fn multi_root_tables_use_lowest_id_root() {
    let table = build_from_paths(&["X/Y", "A/B"], &HierarchyOptions::default(), stamp());

    let rebuilt = reconstruct(&table).expect("tree rebuilt");
    assert_eq!(rebuilt.code, "X");
    assert_eq!(rebuilt.children.len(), 1);

    let forest = reconstruct_forest(&table);
    let roots: Vec<&str> = forest.iter().map(|tree| tree.code.as_str()).collect();
    assert_eq!(roots, vec!["X", "A"]);
    assert_eq!(forest[1].children[0].code, "B");
}

#[test]
fn reconstructing_without_root_fails() {
    let empty = NodeTable::new(&HierarchyOptions::default());
    assert!(matches!(reconstruct(&empty), Err(HierarchyError::RootNotFound)));
    assert!(reconstruct_forest(&empty).is_empty());
}

#[test]
fn csv_roundtrip_reproduces_rows() {
    let table = build_from_tree(&org_chart(), &HierarchyOptions::default(), stamp());
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("nodes.csv");

    let location =
        delimited::save_table(&table, &csv_path, &CsvOptions::default()).expect("CSV written");
    assert!(location.is_absolute());

    let restored = delimited::load_table(
        &location,
        &CsvOptions::default(),
        &HierarchyOptions::default(),
    )
    .expect("CSV read");
    assert_eq!(restored, table);
}

#[test]
fn csv_defaults_write_bom_and_quote_every_field() {
    let table = build_from_paths(&["A/B"], &HierarchyOptions::default(), stamp());
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("nodes.csv");
    delimited::save_table(&table, &csv_path, &CsvOptions::default()).expect("CSV written");

    let bytes = fs::read(&csv_path).expect("CSV bytes");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
    let text = String::from_utf8(bytes[3..].to_vec()).expect("UTF-8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "\"id\",\"code\",\"name\",\"parent_id\",\"parent_code\",\"level\",\"path\",\"order\",\"is_leaf\",\"is_active\",\"created_at\",\"updated_at\""
        )
    );
    assert_eq!(
        lines.next(),
        Some(
            "\"1\",\"A\",\"A\",\"0\",\"\",\"1\",\"A\",\"1\",\"false\",\"true\",\"2024-04-01T09:30:00Z\",\"2024-04-01T09:30:00Z\""
        )
    );
}

#[test]
fn csv_options_control_delimiter_encoding_and_quoting() {
    let options = CsvOptions {
        delimiter: ';',
        encoding: TextEncoding::Utf8,
        quoting: Quoting::Necessary,
    };
    let table = build_from_tree(&org_chart(), &HierarchyOptions::default(), stamp());
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("nodes.csv");
    delimited::save_table(&table, &csv_path, &options).expect("CSV written");

    let text = fs::read_to_string(&csv_path).expect("CSV text");
    assert!(text.starts_with("id;code;name;parent_id;"));

    let restored = delimited::load_table(&csv_path, &options, &HierarchyOptions::default())
        .expect("CSV read");
    assert_eq!(restored, table);
}

#[test]
fn csv_save_with_unusable_delimiter_leaves_existing_file() {
    let options = CsvOptions {
        delimiter: '→',
        ..CsvOptions::default()
    };
    let table = build_from_tree(&org_chart(), &HierarchyOptions::default(), stamp());
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("nodes.csv");
    fs::write(&csv_path, "previous export\n").expect("fixture written");

    let result = delimited::save_table(&table, &csv_path, &options);
    assert!(matches!(result, Err(HierarchyError::InvalidConfig(_))));
    assert_eq!(
        fs::read_to_string(&csv_path).expect("file still readable"),
        "previous export\n"
    );
}

#[test]
fn csv_load_accepts_capitalised_booleans_and_extra_columns() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("legacy.csv");
    fs::write(
        &csv_path,
        "\u{feff}note,id,code,name,parent_id,parent_code,level,path,order,is_leaf,is_active,created_at,updated_at\n\
         x,1,A,Alpha,0,,1,A,1,False,True,2024-04-01T09:30:00+00:00,2024-04-01T09:30:00+00:00\n\
         y,2,B,Beta,1,A,2,A/B,1,True,True,2024-04-01T09:30:00+00:00,2024-04-01T09:30:00+00:00\n",
    )
    .expect("fixture written");

    let table = delimited::load_table(
        &csv_path,
        &CsvOptions::default(),
        &HierarchyOptions::default(),
    )
    .expect("CSV read");

    assert_eq!(table.len(), 2);
    assert_eq!(table.nodes[0].name, "Alpha");
    assert!(!table.nodes[0].is_leaf);
    assert!(table.nodes[1].is_leaf);
    assert_eq!(table.nodes[1].created_at, stamp());
}

#[test]
fn csv_load_reports_missing_columns_and_bad_cells() {
    let temp_dir = tempdir().expect("temporary directory");
    let missing = temp_dir.path().join("missing.csv");
    fs::write(&missing, "id,code\n1,A\n").expect("fixture written");
    let result = delimited::load_table(
        &missing,
        &CsvOptions::default(),
        &HierarchyOptions::default(),
    );
    assert!(matches!(result, Err(HierarchyError::MissingColumn(column)) if column == "name"));

    let bad = temp_dir.path().join("bad.csv");
    fs::write(
        &bad,
        "id,code,name,parent_id,parent_code,level,path,order,is_leaf,is_active,created_at,updated_at\n\
         one,A,A,0,,1,A,1,true,true,2024-04-01T09:30:00Z,2024-04-01T09:30:00Z\n",
    )
    .expect("fixture written");
    let result = delimited::load_table(&bad, &CsvOptions::default(), &HierarchyOptions::default());
    assert!(matches!(
        result,
        Err(HierarchyError::InvalidCell { column, value }) if column == "id" && value == "one"
    ));

    let absent = temp_dir.path().join("absent.csv");
    let result = delimited::load_table(&absent, &CsvOptions::default(), &HierarchyOptions::default());
    assert!(matches!(result, Err(HierarchyError::MissingInput(_))));
}

#[test]
fn load_reapplies_compact_layout() {
    let table = build_from_tree(&org_chart(), &HierarchyOptions::default(), stamp());
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("nodes.csv");
    delimited::save_table(&table, &csv_path, &CsvOptions::default()).expect("CSV written");

    let compact = delimited::load_compact(
        &csv_path,
        &CsvOptions::default(),
        &HierarchyOptions::default(),
    )
    .expect("CSV read");

    assert_eq!(compact.len(), table.len());
    assert_eq!(compact.ids(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(compact.levels(), vec![1, 2, 3, 3, 2, 3, 2]);
    assert_eq!(compact.expand(), table);
}

#[test]
fn excel_roundtrip_reproduces_rows() {
    let table = build_from_paths(
        &["A/B/C", "A/B/D", "A/E/F", "X/Y/Z"],
        &HierarchyOptions::default(),
        stamp(),
    );
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("nodes.xlsx");

    excel_write::write_table(&xlsx_path, &table).expect("Excel written");
    let restored =
        excel_read::read_table(&xlsx_path, &HierarchyOptions::default()).expect("Excel read");

    assert_eq!(restored, table);
}

#[test]
fn json_tree_document_defaults_name_and_children() {
    let temp_dir = tempdir().expect("temporary directory");
    let json_path = temp_dir.path().join("tree.json");
    fs::write(
        &json_path,
        r#"{"code": "A", "children": [{"code": "B", "name": "Beta"}]}"#,
    )
    .expect("fixture written");

    let tree = json::read_tree(&json_path).expect("tree parsed");
    assert_eq!(
        tree,
        TreeValue::new("A", "A").with_child(TreeValue::new("B", "Beta"))
    );
}

#[test]
fn sync_paths_to_csv_to_tree() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("paths.txt");
    fs::write(&input, "A/B/C\nA/B/D\n\nA/E/F\n").expect("paths written");
    let csv_path = temp_dir.path().join("nodes.csv");
    let json_path = temp_dir.path().join("tree.json");
    let settings = Settings::default();

    sync::paths_to_csv(&input, &csv_path, &settings, stamp()).expect("paths to CSV");
    sync::csv_to_tree(&csv_path, &json_path, &settings).expect("CSV to tree");

    let written = fs::read_to_string(&json_path).expect("tree JSON read");
    let tree: TreeNode = serde_json::from_str(&written).expect("tree JSON parsed");
    let expected = TreeValue::leaf("A")
        .with_child(
            TreeValue::leaf("B")
                .with_child(TreeValue::leaf("C"))
                .with_child(TreeValue::leaf("D")),
        )
        .with_child(TreeValue::leaf("E").with_child(TreeValue::leaf("F")));
    assert_eq!(tree.to_value(), expected);
}

#[test]
fn sync_tree_through_csv_and_excel() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("tree.json");
    json::write_tree(&input, &org_chart()).expect("tree written");
    let settings = Settings::default();

    let csv_path = temp_dir.path().join("nodes.csv");
    let from_csv = temp_dir.path().join("from_csv.json");
    sync::tree_to_csv(&input, &csv_path, &settings, stamp()).expect("tree to CSV");
    sync::csv_to_tree(&csv_path, &from_csv, &settings).expect("CSV to tree");

    let xlsx_path = temp_dir.path().join("nodes.xlsx");
    let from_excel = temp_dir.path().join("from_excel.json");
    sync::tree_to_excel(&input, &xlsx_path, &settings, stamp()).expect("tree to Excel");
    sync::excel_to_tree(&xlsx_path, &from_excel, &settings).expect("Excel to tree");

    for output in [from_csv, from_excel] {
        let written = fs::read_to_string(&output).expect("tree JSON read");
        let tree: TreeNode = serde_json::from_str(&written).expect("tree JSON parsed");
        assert_eq!(tree.to_value(), org_chart());
    }
}

#[test]
fn sync_rejects_missing_input() {
    let temp_dir = tempdir().expect("temporary directory");
    let result = sync::tree_to_csv(
        &temp_dir.path().join("nope.json"),
        &temp_dir.path().join("out.csv"),
        &Settings::default(),
        stamp(),
    );
    assert!(matches!(result, Err(HierarchyError::MissingInput(_))));
}
