use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use readmegen::config::ScanConfig;
use readmegen::models::FileKind;
use readmegen::scanner::ProjectScanner;

fn scanner() -> ProjectScanner {
    ProjectScanner::new(ScanConfig {
        max_depth: 1,
        global_timeout: Duration::from_secs(30),
        analysis_workers: 2,
    })
}

// The reference scenario: a.py with one function, sub/ with an empty module,
// and node_modules/ that must vanish entirely.
#[tokio::test]
async fn scan_reference_tree() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    std::fs::write(
        root.join("a.py"),
        "def f(x):\n    \"\"\"Double x.\"\"\"\n    return x * 2\n",
    )
    .expect("write a.py");
    std::fs::create_dir(root.join("sub")).expect("mkdir sub");
    std::fs::write(root.join("sub/b.py"), "VALUE = 3\n").expect("write b.py");
    std::fs::create_dir(root.join("node_modules")).expect("mkdir node_modules");
    std::fs::write(root.join("node_modules/c.js"), "module.exports = {}\n").expect("write c.js");

    let result = scanner().scan(root).await.expect("scan");

    let summary: Vec<(&str, FileKind, usize)> = result
        .file_structure
        .iter()
        .map(|e| (e.path.as_str(), e.kind, e.functions.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a.py", FileKind::File, 1),
            ("sub", FileKind::Directory, 0),
            ("sub/b.py", FileKind::File, 0),
        ]
    );

    let f = &result.file_structure[0].functions[0];
    assert_eq!(f.name, "f");
    assert_eq!(f.description, "Double x.");
    assert_eq!(f.parameters, vec!["x"]);
    assert_eq!(f.return_type, None);

    assert_eq!(result.tech_stack, vec!["Python".to_string()]);
}

#[tokio::test]
async fn scan_counts_every_definition_in_a_fixture() {
    let dir = TempDir::new().expect("temp dir");
    let source = "\
def alpha(a, b) -> str:
    \"\"\"Join a and b.\"\"\"
    return f\"{a}{b}\"

class Greeter:
    def hello(self, name: str) -> None:
        def shout():
            pass
        shout()
";
    std::fs::write(dir.path().join("mod.py"), source).expect("write");

    let result = scanner().scan(dir.path()).await.expect("scan");
    let functions = &result.file_structure[0].functions;

    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "hello", "shout"]);
    assert_eq!(functions[0].return_type.as_deref(), Some("str"));
    assert_eq!(functions[1].parameters, vec!["self", "name"]);
}

#[tokio::test]
async fn scan_missing_path_is_path_not_found() {
    let err = scanner()
        .scan(Path::new("/no/such/project"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, readmegen::ScanError::PathNotFound(_)));
}

#[tokio::test]
async fn scan_marker_only_directory() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("Cargo.toml"), "[package]\n").expect("write");

    let result = scanner().scan(dir.path()).await.expect("scan");
    assert_eq!(result.tech_stack, vec!["Rust".to_string()]);
}

#[tokio::test]
async fn scan_hidden_entries_are_skipped() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::create_dir(dir.path().join(".git")).expect("mkdir");
    std::fs::write(dir.path().join(".git/config"), "").expect("write");
    std::fs::write(dir.path().join("main.py"), "").expect("write");

    let result = scanner().scan(dir.path()).await.expect("scan");
    let paths: Vec<&str> = result.file_structure.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["main.py"]);
}
