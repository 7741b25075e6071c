//! End-to-end conversion of collection documents into script trees

use std::fs;
use std::path::Path;

use curlport::{convert_file, convert_str, ExportOptions, Outcome, SkipReason};
use serde_json::json;

fn convert(doc: serde_json::Value, root: &Path) -> Outcome {
    convert_str(&doc.to_string(), root, &ExportOptions::default()).unwrap()
}

fn converted(outcome: Outcome) -> curlport::ExportReport {
    match outcome {
        Outcome::Converted(report) => report,
        other => panic!("expected a converted collection, got {:?}", other),
    }
}

#[test]
fn test_plain_url_request() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Demo"},
        "item": [{"name": "Get Users", "request": {"method": "GET", "url": "https://api.example.com/users"}}]
    });

    let report = converted(convert(doc, tmp.path()));
    let script = tmp.path().join("Demo").join("Get_Users.sh");
    assert_eq!(report.written, vec![script.clone()]);

    let content = fs::read_to_string(script).unwrap();
    assert_eq!(
        content,
        "#!/bin/bash\n\n\
         # Generated from Postman collection: Demo\n\
         # Request: Get Users\n\n\
         curl --location --request GET 'https://api.example.com/users'\n"
    );
}

#[test]
fn test_structured_url_and_body() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Shop"},
        "item": [{
            "name": "Create Order",
            "request": {
                "method": "post",
                "header": [
                    {"key": "Content-Type", "value": "application/json"},
                    {"key": "X-Token", "value": "a'b", "disabled": false},
                    {"key": "X-Trace", "value": "1", "disabled": true}
                ],
                "url": {
                    "protocol": "https",
                    "host": ["shop", "example", "com"],
                    "path": ["v2", "orders"],
                    "query": [
                        {"key": "dry_run", "value": "true"},
                        {"key": "debug", "value": "1", "disabled": true}
                    ]
                },
                "body": {"mode": "raw", "raw": "{\"sku\":\"A-1\"}"}
            }
        }]
    });

    converted(convert(doc, tmp.path()));
    let content = fs::read_to_string(tmp.path().join("Shop").join("Create_Order.sh")).unwrap();

    assert!(content.contains(
        "curl --location --request POST 'https://shop.example.com/v2/orders?dry_run=true' \\\n"
    ));
    assert!(content.contains("--header 'Content-Type: application/json' \\\n"));
    assert!(content.contains("--header 'X-Token: a'\\''b'"));
    assert!(!content.contains("X-Trace"));
    assert!(!content.contains("debug=1"));
    assert!(content.ends_with("--data-raw '{\"sku\":\"A-1\"}'\n"));
}

#[test]
fn test_formdata_file_placeholder() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Media"},
        "item": [{
            "name": "Upload",
            "request": {
                "method": "POST",
                "url": "https://media.example.com/upload",
                "body": {"mode": "formdata", "formdata": [
                    {"key": "f", "type": "file", "value": "img.png"},
                    {"key": "note", "type": "text", "value": "hi", "disabled": true}
                ]}
            }
        }]
    });

    converted(convert(doc, tmp.path()));
    let content = fs::read_to_string(tmp.path().join("Media").join("Upload.sh")).unwrap();
    assert!(content.contains("--form 'f=@\"/path/to/your/img.png\"'"));
    assert!(!content.contains("note="));
}

#[test]
fn test_empty_collection_is_a_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let outcome = convert(json!({"info": {"name": "Nothing"}, "item": []}), tmp.path());

    assert!(matches!(outcome, Outcome::Empty { .. }));
    assert_eq!(outcome.collection_name(), "Nothing");
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_item_list_is_a_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let outcome = convert(json!({"info": {"name": "Odd"}}), tmp.path());
    assert!(matches!(outcome, Outcome::Empty { .. }));
}

#[test]
fn test_shapeless_node_does_not_stop_siblings() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Mixed"},
        "item": [
            {"name": "First", "request": {"url": "http://a"}},
            {"name": "Mystery", "description": "no item, no request"},
            {"name": "Last", "request": {"url": "http://b"}}
        ]
    });

    let report = converted(convert(doc, tmp.path()));
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "Mystery");
    assert!(matches!(report.skipped[0].reason, SkipReason::UnrecognizedNode));
    assert!(tmp.path().join("Mixed").join("Last.sh").is_file());
}

#[test]
fn test_unsupported_url_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Urls"},
        "item": [
            {"name": "Numeric", "request": {"url": 12}},
            {"name": "Fine", "request": {"url": {"raw": "{{baseUrl}}/ok"}}}
        ]
    });

    let report = converted(convert(doc, tmp.path()));
    assert!(matches!(report.skipped[0].reason, SkipReason::UnsupportedUrl(_)));
    let content = fs::read_to_string(tmp.path().join("Urls").join("Fine.sh")).unwrap();
    assert!(content.contains("'{{baseUrl}}/ok'"));
}

#[test]
fn test_nesting_depth_is_mirrored() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Deep"},
        "item": [{"name": "a", "item": [{"name": "b", "item": [{"name": "c", "item": [
            {"name": "leaf", "request": {"url": "http://x"}}
        ]}]}]}]
    });

    let report = converted(convert(doc, tmp.path()));
    assert_eq!(report.folders, 3);

    let script = &report.written[0];
    let relative = script.strip_prefix(tmp.path()).unwrap();
    // collection root + three folders, then the file
    assert_eq!(relative.components().count(), 5);
    assert_eq!(relative, Path::new("Deep/a/b/c/leaf.sh"));
}

#[test]
fn test_sibling_order_is_preserved() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Order"},
        "item": [
            {"name": "z", "request": {"url": "http://z"}},
            {"name": "dir", "item": [{"name": "m", "request": {"url": "http://m"}}]},
            {"name": "a", "request": {"url": "http://a"}}
        ]
    });

    let report = converted(convert(doc, tmp.path()));
    let names: Vec<_> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["z.sh", "m.sh", "a.sh"]);
}

#[test]
fn test_unnamed_collection_and_custom_shebang() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({"item": [{"request": {"url": "http://x"}}]});
    let options = ExportOptions {
        shebang: "#!/usr/bin/env bash".into(),
    };

    let outcome = convert_str(&doc.to_string(), tmp.path(), &options).unwrap();
    let report = converted(outcome);
    let script = tmp
        .path()
        .join("UnnamedCollection")
        .join("UnnamedRequest.sh");
    assert_eq!(report.written, vec![script.clone()]);
    assert!(fs::read_to_string(script)
        .unwrap()
        .starts_with("#!/usr/bin/env bash\n\n# Generated from Postman collection: UnnamedCollection\n"));
}

#[test]
fn test_convert_file_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("collection.json");
    fs::write(
        &input,
        json!({"info": {"name": "Disk"}, "item": [{"name": "Ping", "request": "http://x/ping"}]}).to_string(),
    )
    .unwrap();

    let out = tmp.path().join("out");
    let outcome = convert_file(&input, &out, &ExportOptions::default()).unwrap();
    assert_eq!(outcome.output_dir(), out.join("Disk"));
    assert!(out.join("Disk").join("Ping.sh").is_file());
}

#[test]
fn test_invalid_json_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = convert_str("[1, 2", tmp.path(), &ExportOptions::default()).unwrap_err();
    assert!(err.is_input_format());
}

#[test]
fn test_array_urls_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let doc = json!({
        "info": {"name": "Arrays"},
        "item": [
            {"name": "Empty", "request": {"url": []}},
            {"name": "Proto", "request": {"url": ["https"]}},
            {"name": "Tuple Header", "request": {"url": "http://x", "header": [["X-A", "1"]]}}
        ]
    });

    let report = converted(convert(doc, tmp.path()));
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 3);
    assert!(matches!(report.skipped[0].reason, SkipReason::UnsupportedUrl(_)));
    assert!(matches!(report.skipped[1].reason, SkipReason::UnsupportedUrl(_)));
    assert!(matches!(report.skipped[2].reason, SkipReason::MalformedRequest(_)));
}

#[test]
fn test_dot_folder_names_stay_under_collection_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("root");
    let doc = json!({
        "info": {"name": ".."},
        "item": [{"name": "..", "item": [{"name": "..", "item": [
            {"name": "x", "request": {"url": "http://x"}}
        ]}]}]
    });

    let outcome = convert_str(&doc.to_string(), &root, &ExportOptions::default()).unwrap();
    let report = converted(outcome);
    let script = root
        .join("UnnamedCollection")
        .join("UnnamedFolder")
        .join("UnnamedFolder")
        .join("x.sh");
    assert_eq!(report.written, vec![script]);
    assert!(!tmp.path().join("x.sh").exists());
    assert!(!root.join("x.sh").exists());
}
