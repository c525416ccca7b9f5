use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::models::{FileEntry, FunctionSignature};
use crate::parallel::{AnalysisPool, PooledTask};
use crate::scanner::analyzer::{self, AnalyzerRegistry};

/// Noise directories never listed nor descended into, in addition to any
/// entry whose name starts with a dot. Fixed, not caller-tunable.
pub const EXCLUDED_NAMES: &[&str] = &["venv", "env", "__pycache__", "node_modules"];

/// Walks a directory tree up to `max_depth` levels below the root, producing
/// a preorder inventory of files and directories
///
/// Recognized source files are analyzed on the given pool; analyses are
/// dispatched when a directory is listed and consumed when its entries are
/// appended, so several may be in flight at once.
///
/// On expiry of `global_timeout` the partial inventory accumulated so far is
/// returned as a success: the scan is advisory and a truncated listing beats
/// no listing. Entries are appended whole, never half-built.
pub async fn walk(
    root: &Path,
    max_depth: usize,
    global_timeout: Duration,
    pool: &AnalysisPool,
    registry: &AnalyzerRegistry,
) -> Result<Vec<FileEntry>, ScanError> {
    let is_dir = tokio::fs::metadata(root).await.map(|m| m.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    let canonical_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|_| ScanError::PathNotFound(root.to_path_buf()))?;

    let walker = Walker {
        root,
        max_depth,
        pool,
        registry,
        inventory: Mutex::new(Vec::new()),
    };

    let traversal = walker.walk_dir(root.to_path_buf(), 0, vec![canonical_root]);
    if tokio::time::timeout(global_timeout, traversal).await.is_err() {
        // Dropping the traversal future aborts any in-flight analyses.
        warn!(
            "scan of {} exceeded {:?}, returning partial inventory",
            root.display(),
            global_timeout
        );
    }

    let inventory = walker
        .inventory
        .into_inner()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(inventory)
}

struct Walker<'a> {
    root: &'a Path,
    max_depth: usize,
    pool: &'a AnalysisPool,
    registry: &'a AnalyzerRegistry,
    inventory: Mutex<Vec<FileEntry>>,
}

struct Child {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl Walker<'_> {
    /// Lists one directory level, dispatching analyses for recognized source
    /// files, then appends entries in sorted order, recursing preorder
    ///
    /// `ancestors` carries the canonical paths of every directory on the
    /// current recursion stack and breaks symbolic-link cycles.
    fn walk_dir(
        &self,
        dir: PathBuf,
        depth: usize,
        ancestors: Vec<PathBuf>,
    ) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if depth > self.max_depth {
                return;
            }

            let children = match self.list_children(&dir).await {
                Ok(children) => children,
                Err(e) => {
                    warn!("skipping unreadable directory {}: {}", dir.display(), e);
                    return;
                }
            };

            // Dispatch pass: start analyses while the listing is still warm.
            let mut tasks: Vec<Option<PooledTask<Vec<FunctionSignature>>>> =
                Vec::with_capacity(children.len());
            for child in &children {
                tasks.push(match self.registry.for_path(&child.path) {
                    Some(analyzer) if !child.is_dir => {
                        let path = child.path.clone();
                        let task = self
                            .pool
                            .spawn(async move { analyzer::analyze_file(analyzer, &path).await })
                            .await;
                        Some(task)
                    }
                    _ => None,
                });
            }

            // Attach pass: append entries in order, consuming analysis
            // results at the point each file entry is built.
            for (child, task) in children.into_iter().zip(tasks) {
                let rel = self.relative_path(&child.path);
                if child.is_dir {
                    self.append(FileEntry::directory(rel));
                    if depth + 1 <= self.max_depth {
                        match self.descend_target(&child.path, &ancestors).await {
                            Some(canonical) => {
                                let mut next = ancestors.clone();
                                next.push(canonical);
                                self.walk_dir(child.path, depth + 1, next).await;
                            }
                            None => {
                                debug!("not descending into {}", child.path.display());
                            }
                        }
                    }
                } else {
                    let functions = match task {
                        Some(task) => task.join().await.unwrap_or_default(),
                        None => Vec::new(),
                    };
                    self.append(FileEntry::file(rel, functions));
                }
            }
        })
    }

    /// Lists, filters, and name-sorts the immediate children of `dir`
    ///
    /// Unreadable individual entries are skipped, never fatal.
    async fn list_children(&self, dir: &Path) -> std::io::Result<Vec<Child>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut children = Vec::new();

        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if name.starts_with('.') || EXCLUDED_NAMES.contains(&name.as_str()) {
                        continue;
                    }
                    let path = entry.path();
                    // Follows symlinks so a link to a directory lists as one.
                    let is_dir = tokio::fs::metadata(&path)
                        .await
                        .map(|m| m.is_dir())
                        .unwrap_or(false);
                    children.push(Child { name, path, is_dir });
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("skipping unreadable entry under {}: {}", dir.display(), e);
                }
            }
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    /// Resolves a subdirectory for descent, refusing symlink cycles
    ///
    /// Returns the canonical path to push onto the ancestor stack, or `None`
    /// when the directory resolves back to an ancestor or cannot be resolved.
    async fn descend_target(&self, dir: &Path, ancestors: &[PathBuf]) -> Option<PathBuf> {
        match tokio::fs::canonicalize(dir).await {
            Ok(canonical) => {
                if ancestors.contains(&canonical) {
                    warn!(
                        "symlink cycle at {} (resolves to ancestor {})",
                        dir.display(),
                        canonical.display()
                    );
                    None
                } else {
                    Some(canonical)
                }
            }
            Err(e) => {
                warn!("cannot resolve {}: {}", dir.display(), e);
                None
            }
        }
    }

    /// Renders a path relative to the scan root with forward slashes on
    /// every host OS
    fn relative_path(&self, full: &Path) -> String {
        let rel = full.strip_prefix(self.root).unwrap_or(full);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn append(&self, entry: FileEntry) {
        self.inventory
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry);
    }
}
