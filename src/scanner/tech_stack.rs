use std::collections::BTreeSet;
use std::path::Path;

use tracing::warn;

// Marker files whose presence directly under the root implies a technology.
const MARKER_FILES: &[(&str, &str)] = &[
    ("requirements.txt", "Python"),
    ("package.json", "Node.js"),
    ("pom.xml", "Java"),
    ("build.gradle", "Java"),
    ("Cargo.toml", "Rust"),
    ("go.mod", "Go"),
    ("Gemfile", "Ruby"),
    ("composer.json", "PHP"),
    ("Dockerfile", "Docker"),
    ("docker-compose.yml", "Docker"),
    (".env", "Environment Variables"),
];

// Source-file extensions mapped to language labels, checked one level deep.
const EXTENSION_LABELS: &[(&str, &str)] = &[
    ("py", "Python"),
    ("js", "JavaScript/TypeScript"),
    ("jsx", "JavaScript/TypeScript"),
    ("ts", "JavaScript/TypeScript"),
    ("tsx", "JavaScript/TypeScript"),
    ("java", "Java"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("rb", "Ruby"),
    ("php", "PHP"),
];

/// Detects the technology stack of a project from marker files and
/// top-level file extensions
///
/// Never fails: I/O errors degrade to whatever labels were gathered before
/// the error. Labels are deduplicated and sorted.
pub async fn detect(root: &Path) -> Vec<String> {
    let mut labels = BTreeSet::new();

    for (file_name, label) in MARKER_FILES {
        if tokio::fs::try_exists(root.join(file_name)).await.unwrap_or(false) {
            labels.insert((*label).to_string());
        }
    }

    match tokio::fs::read_dir(root).await {
        Ok(mut entries) => loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if name.starts_with('.') {
                        continue;
                    }
                    let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
                    if !is_file {
                        continue;
                    }
                    if let Some(label) = extension_label(&name) {
                        labels.insert(label.to_string());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("tech stack listing stopped early for {}: {}", root.display(), e);
                    break;
                }
            }
        },
        Err(e) => {
            warn!("tech stack detection could not list {}: {}", root.display(), e);
        }
    }

    labels.into_iter().collect()
}

fn extension_label(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    EXTENSION_LABELS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, label)| *label)
}
