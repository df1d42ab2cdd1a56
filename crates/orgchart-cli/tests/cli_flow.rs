//! Integration tests for orgchart-cli functionality.
//! Tests the underlying library functions that the CLI commands invoke.

use orgchart_core::builder::{BuildError, GraphBuilder};
use orgchart_core::config::OrgConfig;
use orgchart_core::decompose::Decomposition;
use orgchart_core::groups::GroupStrategy;
use orgchart_core::layout::Layout;
use orgchart_core::rank::RankStrategy;
use orgchart_core::source::Strict;
use std::path::Path;

const DOC: &str = r#"{
    "unit": [
        { "id": "Board" },
        { "id": "Finance", "parents": ["Board"] },
        { "id": "Audit", "parents": ["Finance", "Board", "ghost"] },
        { "id": "Lab" },
        { "id": "Bench", "parents": ["Lab"] }
    ],
    "role": [
        { "id": "Chair" },
        { "id": "Analyst", "parents": ["Chair"] }
    ],
    "subjects": [
        { "id": "eve", "uid": "u-9", "relations": [{ "unit": "Audit", "role": "Analyst" }] }
    ]
}"#;

fn write_doc(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("hierarchy.json");
    std::fs::write(&path, DOC).unwrap();
    path
}

#[test]
fn test_config_from_project_root() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg_dir = tmp.path().join(".orgchart");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("config.toml"),
        "[decompose]\nrank_strategy = \"short\"\ngrouping = \"union_find\"\n",
    )
    .unwrap();

    let config = OrgConfig::load(tmp.path()).unwrap();
    assert_eq!(config.decompose.rank_strategy, RankStrategy::Short);
    assert_eq!(config.decompose.grouping, GroupStrategy::UnionFind);
}

#[test]
fn test_document_to_layout_file() {
    let tmp = tempfile::tempdir().unwrap();
    let doc_path = write_doc(tmp.path());
    let config = OrgConfig::default();

    let doc = orgchart_core::document::load(&doc_path).unwrap();
    let hierarchy = GraphBuilder::new(config.layout.clone())
        .build(&doc)
        .unwrap();
    let mut decomposition = Decomposition::new(&hierarchy, &config.decompose);
    decomposition.rank(config.decompose.rank_strategy).unwrap();

    let out = tmp.path().join("layout.json");
    orgchart_core::storage::save_layout(&out, &Layout::new(&hierarchy, &decomposition)).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["group_count"], 3);
    assert_eq!(json["rank_strategy"], "long");
    assert_eq!(json["nodes"].as_array().unwrap().len(), 7);

    let audit = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["id"] == "Audit")
        .unwrap();
    assert_eq!(audit["parents"], serde_json::json!(["Finance", "Board"]));
    assert_eq!(audit["subjects"], serde_json::json!(["eve"]));

    let roots: Vec<&str> = json["roots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(roots, vec!["Board", "Lab", "Chair"]);
}

#[test]
fn test_strict_rejects_relation_less_subject() {
    let doc = orgchart_core::document::from_json(
        r#"{ "unit": [{ "id": "A" }], "subjects": [{ "id": "x", "uid": "1" }] }"#,
    )
    .unwrap();

    assert!(GraphBuilder::default().build(&doc).is_ok());
    let err = GraphBuilder::default()
        .with_validator(Strict)
        .build(&doc)
        .unwrap_err();
    assert!(matches!(err, BuildError::Validation(_)));
}

#[test]
fn test_load_nonexistent_document() {
    let tmp = tempfile::tempdir().unwrap();
    let result = orgchart_core::document::load(&tmp.path().join("missing.json"));
    assert!(result.is_err(), "loading a missing document should fail");
}
