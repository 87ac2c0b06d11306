//! Validation against a local mirror of the schema host layout.

use std::path::Path;

use kubeschema_core::{ResultStatus, SchemaLocator};
use kubeschema_schema::{DefaultSchemaFetcher, FileSchemaFetcher, HttpSchemaFetcher, ResourceValidator};
use serde_json::json;

fn write_schema(root: &Path, version_dir: &str, file: &str, schema: serde_json::Value) {
    let dir = root.join(version_dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), serde_json::to_vec_pretty(&schema).unwrap()).unwrap();
}

fn storage_class_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["apiVersion", "kind", "metadata", "provisioner"],
        "properties": {
            "apiVersion": {"type": "string"},
            "kind": {"type": "string"},
            "metadata": {"type": "object"},
            "provisioner": {"type": "string"},
            "parameters": {"type": "object", "additionalProperties": {"type": "string"}}
        },
        "additionalProperties": false
    })
}

const STORAGE_CLASS: &str = "\
apiVersion: storage.k8s.io/v1
kind: StorageClass
metadata:
  name: fast
provisioner: kubernetes.io/gce-pd
parameters:
  type: pd-ssd
";

#[test]
fn file_url_mirror() {
    let dir = tempfile::tempdir().unwrap();
    write_schema(
        dir.path(),
        "master-standalone-strict",
        "storageclass-storage-v1.json",
        storage_class_schema(),
    );

    let base = format!("file://{}", dir.path().display());
    let validator = ResourceValidator::new(SchemaLocator::new("master", base), FileSchemaFetcher);
    let outcome = validator.validate(STORAGE_CLASS.as_bytes(), "sc.yaml");

    assert!(outcome.is_success(), "{:?}", outcome);
    assert_eq!(outcome.results[0].kind, "StorageClass");
    assert_eq!(outcome.results[0].api_version, "storage.k8s.io/v1");
}

#[test]
fn plain_directory_mirror_through_default_fetcher() {
    let dir = tempfile::tempdir().unwrap();
    write_schema(
        dir.path(),
        "v1.18.0-standalone-strict",
        "storageclass-storage-v1.json",
        storage_class_schema(),
    );

    let base = dir.path().display().to_string();
    let fetcher = DefaultSchemaFetcher::new(HttpSchemaFetcher::new().unwrap());
    let validator = ResourceValidator::new(SchemaLocator::new("1.18.0", base), fetcher);

    let missing_provisioner = "apiVersion: storage.k8s.io/v1\nkind: StorageClass\nmetadata:\n  name: slow\n";
    let outcome = validator.validate(missing_provisioner.as_bytes(), "sc.yaml");

    assert!(outcome.errors.is_none());
    let result = &outcome.results[0];
    assert_eq!(result.status(), ResultStatus::Invalid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.contains("provisioner"));
}

#[test]
fn crlf_stream_against_mirror() {
    let dir = tempfile::tempdir().unwrap();
    write_schema(
        dir.path(),
        "master-standalone-strict",
        "storageclass-storage-v1.json",
        storage_class_schema(),
    );

    let input = STORAGE_CLASS.replace('\n', "\r\n");
    let input = format!("{input}---\r\n{input}");
    let validator = ResourceValidator::new(
        SchemaLocator::new("master", dir.path().display().to_string()),
        FileSchemaFetcher,
    );
    let outcome = validator.validate(input.as_bytes(), "sc.yaml");

    assert!(outcome.is_success(), "{:?}", outcome);
    assert_eq!(outcome.results.len(), 2);
}
