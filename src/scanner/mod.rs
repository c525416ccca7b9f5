//! Project scanning: directory inventory plus tech-stack detection.
//!
//! The walker and the detector are independent read-only passes over the
//! same subtree and run concurrently. Each scan owns its bounded analysis
//! pool; nothing is shared mutably across concurrent scans.

/// Single-file source analysis behind an extension registry
pub mod analyzer;
/// Shallow marker-file and extension based stack detection
pub mod tech_stack;
/// Depth-bounded, timeout-guarded directory traversal
pub mod walker;

use std::path::Path;

use tracing::info;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::ScanResult;
use crate::parallel::AnalysisPool;

pub use analyzer::{AnalyzerRegistry, PythonAnalyzer, SourceAnalyzer};

/// Facade combining the directory walker and the tech-stack detector
#[derive(Clone)]
pub struct ProjectScanner {
    config: ScanConfig,
    registry: AnalyzerRegistry,
}

impl ProjectScanner {
    /// Creates a scanner with the given limits and the default analyzers
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            registry: AnalyzerRegistry::default(),
        }
    }

    /// Creates a scanner with a caller-supplied analyzer registry
    pub fn with_registry(config: ScanConfig, registry: AnalyzerRegistry) -> Self {
        Self { config, registry }
    }

    /// Scans `root`, returning the merged file inventory and tech stack
    ///
    /// Fails only when `root` is missing or not a directory; a scan that hits
    /// the global timeout still succeeds with a partial inventory.
    pub async fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        let pool = AnalysisPool::new(self.config.analysis_workers);

        let (file_structure, tech_stack) = tokio::join!(
            walker::walk(
                root,
                self.config.max_depth,
                self.config.global_timeout,
                &pool,
                &self.registry,
            ),
            tech_stack::detect(root),
        );
        let file_structure = file_structure?;

        info!(
            "scanned {}: {} entries, {} technologies",
            root.display(),
            file_structure.len(),
            tech_stack.len()
        );
        Ok(ScanResult {
            file_structure,
            tech_stack,
        })
    }
}
