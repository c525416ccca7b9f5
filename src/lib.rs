#![warn(missing_docs)]
#![warn(clippy::all)]

//! readmegen - project scanning and README draft generation
//!
//! This library backs a small HTTP service with two operations: scanning a
//! local project directory into a file/tech-stack inventory (with per-file
//! function-signature extraction for recognized source files), and turning a
//! structured project description into three README drafts via an
//! OpenAI-compatible chat-completion API.
//!
//! ## Usage
//! ```rust,ignore
//! use readmegen::{config::ScanConfig, scanner::ProjectScanner};
//! use std::path::Path;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = ProjectScanner::new(ScanConfig::default());
//!     let result = scanner.scan(Path::new("/home/me/project")).await?;
//!     println!("{} entries", result.file_structure.len());
//!     Ok(())
//! }
//! ```

/// REST API router and handlers
pub mod api;
/// Configuration for the server, scanner, and upstream API
pub mod config;
/// Error handling types and utilities
pub mod error;
/// README prompt assembly, upstream call, and variant splitting
pub mod generator;
/// Wire and domain data model
pub mod models;
/// Bounded concurrent execution of analysis tasks
pub mod parallel;
/// Directory walking, source analysis, and tech-stack detection
pub mod scanner;

// Re-export common types
pub use api::{create_app, AppState};
pub use config::Config;
pub use error::{GeneratorError, Result, ScanError, ServiceError};
pub use generator::ReadmeGenerator;
pub use models::{FileEntry, FileKind, FunctionSignature, ReadmeResponse, ScanResult};
pub use scanner::ProjectScanner;
