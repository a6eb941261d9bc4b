use std::fs;
use std::path::{Path, PathBuf};

use catalog_cli::{
    check_explanation_paths, fix_fragment_files, run_reconcile, CheckPathsInput,
    FixFragmentsInput, ReconcileInput, CONFIG_FILE,
};
use serde_json::Value;

const DOCUMENT: &str = "data/materials/textbook_basic.json";
const STORE: &str = "data/explanations/textbook_basic";

fn write(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn seed_project(root: &Path) {
    write(
        &root.join(STORE).join("01/01/01.html"),
        "<h2 class=\"prob-title-sub\">例題1：等速直線運動</h2><p>解説</p>",
    );
    write(
        &root.join(STORE).join("01/01/12.html"),
        "<h3>類題2：斜面上の運動</h3>",
    );
    write(
        &root.join("links.json"),
        r#"[
  [1, "類題2", "https://video.example/rel2"],
  [1, "例題2", "https://video.example/ex2"],
  [5, "問1", "https://video.example/q1"]
]"#,
    );
}

fn input(root: &Path) -> ReconcileInput {
    ReconcileInput {
        root: root.to_path_buf(),
        sheet: Some(PathBuf::from("links.json")),
        ..ReconcileInput::default()
    }
}

fn problems(document: &Path) -> Vec<Value> {
    let raw = fs::read_to_string(document).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    value["subjects"][0]["fields"][0]["problems"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

#[test]
fn reconcile_builds_catalog_and_second_pass_is_a_no_op() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_project(root);

    let first = run_reconcile(input(root)).expect("first pass");
    assert!(!first.document_existed);
    assert!(first.changed);
    assert!(first.written);
    assert_eq!(first.report.fragments_seen, 2);
    assert_eq!(first.report.merge.fields_created, 1);
    assert_eq!(first.report.merge.entries_created, 2);
    assert_eq!(first.report.placeholders_inserted, 1);
    assert_eq!(first.report.enrich.links_attached, 1);
    assert_eq!(first.report.enrich.skipped_explained, 1);
    assert_eq!(first.report.enrich.unmatched_rows, 1);

    let document = root.join(DOCUMENT);
    let entries = problems(&document);
    let ids: Vec<&str> = entries.iter().filter_map(|e| e["id"].as_str()).collect();
    assert_eq!(ids, vec!["basic_01_01_01", "basic_01_01_02", "basic_01_01_12"]);
    assert_eq!(entries[1]["title"], "例題2：斜面上の運動");
    assert_eq!(entries[1]["youtubeUrl"], "https://video.example/ex2");
    assert!(entries[1].get("explanationPath").is_none());
    assert_eq!(
        entries[2]["explanationPath"],
        "data/explanations/textbook_basic/01/01/12.html"
    );

    let bytes = fs::read(&document).unwrap();
    let second = run_reconcile(input(root)).expect("second pass");
    assert!(second.document_existed);
    assert!(!second.changed);
    assert_eq!(second.sha256_before, second.sha256_after);
    assert_eq!(second.report.merge.entries_created, 0);
    assert_eq!(second.report.placeholders_inserted, 0);
    assert_eq!(second.report.enrich.links_attached, 0);
    assert_eq!(fs::read(&document).unwrap(), bytes);
}

#[test]
fn dry_run_leaves_the_document_unwritten() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_project(root);

    let out = run_reconcile(ReconcileInput {
        dry_run: true,
        ..input(root)
    })
    .expect("dry run");
    assert!(out.changed);
    assert!(!out.written);
    assert!(!root.join(DOCUMENT).exists());
}

#[test]
fn config_file_redirects_document_and_prefix() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_project(root);
    write(
        &root.join(CONFIG_FILE),
        "[catalog]\ndocument = \"catalog.json\"\nid_prefix = \"adv\"\n\n[fields]\n\"01/01\" = \"運動の表し方\"\n",
    );

    let out = run_reconcile(input(root)).expect("reconcile");
    assert_eq!(out.document, root.join("catalog.json"));
    let raw = fs::read_to_string(root.join("catalog.json")).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["subjects"][0]["fields"][0]["fieldName"], "運動の表し方");
    assert_eq!(
        value["subjects"][0]["fields"][0]["problems"][0]["id"],
        "adv_01_01_01"
    );
}

#[test]
fn check_paths_reports_missing_fragments() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_project(root);

    let missing_doc = check_explanation_paths(CheckPathsInput {
        root: root.to_path_buf(),
        document: None,
    });
    assert!(missing_doc.is_err());

    run_reconcile(input(root)).expect("reconcile");
    let clean = check_explanation_paths(CheckPathsInput {
        root: root.to_path_buf(),
        document: None,
    })
    .expect("check");
    assert_eq!(clean.checked, 2);
    assert!(clean.missing.is_empty());

    fs::remove_file(root.join(STORE).join("01/01/01.html")).unwrap();
    let broken = check_explanation_paths(CheckPathsInput {
        root: root.to_path_buf(),
        document: None,
    })
    .expect("check");
    assert_eq!(
        broken.missing,
        vec!["data/explanations/textbook_basic/01/01/01.html".to_string()]
    );
}

#[test]
fn fix_fragments_rewrites_only_full_documents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    let full = root.join("full.html");
    let bare = root.join("bare.html");
    write(
        &full,
        "<!DOCTYPE html>\n<html><body>\n<div class=\"viewer-container\">\n<div class=\"explanation-area\">\n<h3>問1：変位</h3>\n</div>\n</div>\n</body></html>",
    );
    write(&bare, "<h3>問2</h3>");
    let original = fs::read_to_string(&full).unwrap();

    let dry = fix_fragment_files(FixFragmentsInput {
        files: vec![full.clone(), bare.clone(), root.join("absent.html")],
        dry_run: true,
    })
    .expect("dry run");
    let outcomes: Vec<&str> = dry.files.iter().map(|f| f.outcome).collect();
    assert_eq!(outcomes, vec!["container", "not_a_document", "missing"]);
    assert_eq!(dry.rewritten, 1);
    assert_eq!(fs::read_to_string(&full).unwrap(), original);

    let done = fix_fragment_files(FixFragmentsInput {
        files: vec![full.clone(), bare.clone()],
        dry_run: false,
    })
    .expect("rewrite");
    assert!(done.files[0].written);
    assert!(!done.files[1].written);
    assert_eq!(fs::read_to_string(&full).unwrap(), "<h3>問1：変位</h3>");
    assert_eq!(fs::read_to_string(&bare).unwrap(), "<h3>問2</h3>");
}

#[test]
fn late_fragment_fills_the_placeholder_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    seed_project(root);
    run_reconcile(input(root)).expect("first pass");

    write(&root.join(STORE).join("01/01/02.html"), "<h3>例題2：斜面の導入</h3>");
    let second = run_reconcile(input(root)).expect("second pass");
    assert!(second.changed);
    assert_eq!(second.report.merge.entries_created, 0);
    assert_eq!(second.report.merge.paths_attached, 1);
    assert_eq!(second.report.placeholders_inserted, 0);

    let document = root.join(DOCUMENT);
    let entries = problems(&document);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["id"], "basic_01_01_02");
    assert_eq!(entries[1]["title"], "例題2：斜面上の運動");
    assert_eq!(
        entries[1]["explanationPath"],
        "data/explanations/textbook_basic/01/01/02.html"
    );
    assert_eq!(entries[1]["youtubeUrl"], "https://video.example/ex2");

    let bytes = fs::read(&document).unwrap();
    let third = run_reconcile(input(root)).expect("third pass");
    assert!(!third.changed);
    assert_eq!(third.report.merge.paths_attached, 0);
    assert_eq!(fs::read(&document).unwrap(), bytes);
}

#[test]
fn fix_fragments_keeps_going_past_unreadable_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    let binary = root.join("latin1.html");
    let full = root.join("full.html");
    fs::write(&binary, [0x3c, 0x68, 0x33, 0x3e, 0xff, 0xfe]).unwrap();
    write(
        &full,
        "<!DOCTYPE html>\n<html><body>\n<div class=\"viewer-container\">\n<div class=\"explanation-area\">\n<h3>問3</h3>\n</div>\n</div>\n</body></html>",
    );

    let out = fix_fragment_files(FixFragmentsInput {
        files: vec![binary.clone(), full.clone()],
        dry_run: false,
    })
    .expect("batch completes");
    let outcomes: Vec<&str> = out.files.iter().map(|f| f.outcome).collect();
    assert_eq!(outcomes, vec!["unreadable", "container"]);
    assert_eq!(out.failed, 1);
    assert_eq!(out.rewritten, 1);
    assert_eq!(fs::read(&binary).unwrap(), vec![0x3c, 0x68, 0x33, 0x3e, 0xff, 0xfe]);
    assert_eq!(fs::read_to_string(&full).unwrap(), "<h3>問3</h3>");
}
