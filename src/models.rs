use serde::{Deserialize, Serialize};

/// Kind of filesystem node discovered during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Regular file
    File,
    /// Directory (recorded before its children)
    Directory,
}

/// One parsed function definition found in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Function name as written in the source
    pub name: String,
    /// Leading docstring, empty when the function has none
    #[serde(default)]
    pub description: String,
    /// Parameter names in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Declared return-type annotation, verbatim from source
    #[serde(default)]
    pub return_type: Option<String>,
}

/// One filesystem node in the scan inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the scan root, forward-slash separated on every OS
    pub path: String,
    /// Whether this entry is a file or a directory
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Parsed function signatures; empty for directories and non-source files
    #[serde(default)]
    pub functions: Vec<FunctionSignature>,
}

impl FileEntry {
    /// Creates a directory entry (directories never carry functions)
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::Directory,
            functions: Vec::new(),
        }
    }

    /// Creates a file entry with the given analysis result
    pub fn file(path: impl Into<String>, functions: Vec<FunctionSignature>) -> Self {
        Self {
            path: path.into(),
            kind: FileKind::File,
            functions,
        }
    }
}

/// Aggregate result of one project scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Preorder inventory of files and directories
    pub file_structure: Vec<FileEntry>,
    /// Detected technology labels, deduplicated and sorted
    pub tech_stack: Vec<String>,
}

/// Structured project description submitted to the README generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    /// Display name of the project
    pub project_name: String,
    /// Short prose description
    pub description: String,
    /// Technology labels, typically from a prior scan
    pub tech_stack: Vec<String>,
    /// Public deployment URL if the project is hosted somewhere
    #[serde(default)]
    pub deployment_url: Option<String>,
    /// File inventory, typically from a prior scan
    #[serde(default)]
    pub file_structure: Vec<FileEntry>,
    /// Flattened function list used for the metadata counts
    #[serde(default)]
    pub functions: Vec<FunctionSignature>,
    /// Author display name
    #[serde(default)]
    pub author_name: Option<String>,
    /// Author contact email
    #[serde(default)]
    pub author_email: Option<String>,
    /// Author GitHub handle
    #[serde(default)]
    pub github_username: Option<String>,
}

/// One generated README draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeVariant {
    /// Markdown body of the draft, may be empty for placeholder slots
    pub content: String,
    /// Style label ("Professional", "Modern", "Minimal")
    pub style: String,
}

/// Summary metadata echoed back with the generated variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeMetadata {
    /// Project name from the request
    pub project_name: String,
    /// Tech stack from the request
    pub tech_stack: Vec<String>,
    /// Number of functions in the request
    pub num_functions: usize,
    /// Number of file entries in the request
    pub num_files: usize,
}

/// Response payload of the generate-readme operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeResponse {
    /// Always exactly three variants, padded with placeholders if needed
    pub readme_variants: Vec<ReadmeVariant>,
    /// Summary counts for the UI
    pub metadata: ReadmeMetadata,
}
