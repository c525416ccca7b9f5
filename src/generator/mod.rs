//! README generation: prompt assembly, upstream completion call, and
//! splitting of the returned text into three labeled variants.

/// Chat-completion client for the Groq API
pub mod groq;

use tracing::info;

use crate::config::LlmConfig;
use crate::error::GeneratorError;
use crate::models::{ProjectDetails, ReadmeMetadata, ReadmeResponse, ReadmeVariant};

pub use groq::GroqClient;

/// Style labels applied to the three variants, in order
pub const VARIANT_STYLES: [&str; 3] = ["Professional", "Modern", "Minimal"];

/// Generates README drafts for a project description
#[derive(Clone)]
pub struct ReadmeGenerator {
    client: GroqClient,
}

impl ReadmeGenerator {
    /// Creates a generator talking to the configured completion API
    pub fn new(config: LlmConfig) -> Result<Self, GeneratorError> {
        Ok(Self {
            client: GroqClient::new(config)?,
        })
    }

    /// Builds the prompt, calls the upstream API, and splits the result into
    /// exactly three labeled variants
    pub async fn generate(&self, project: &ProjectDetails) -> Result<ReadmeResponse, GeneratorError> {
        let prompt = build_prompt(project);
        let text = self.client.complete(&prompt).await?;
        info!(
            "generated {} characters of README text for {}",
            text.len(),
            project.project_name
        );

        Ok(ReadmeResponse {
            readme_variants: split_variants(&text),
            metadata: ReadmeMetadata {
                project_name: project.project_name.clone(),
                tech_stack: project.tech_stack.clone(),
                num_functions: project.functions.len(),
                num_files: project.file_structure.len(),
            },
        })
    }
}

/// Renders the natural-language project description sent upstream
pub fn build_prompt(project: &ProjectDetails) -> String {
    let not_provided = "Not provided".to_string();
    let deployment = project.deployment_url.as_ref().unwrap_or(&not_provided);
    let author = project.author_name.as_ref().unwrap_or(&not_provided);
    let email = project.author_email.as_ref().unwrap_or(&not_provided);
    let github = project.github_username.as_ref().unwrap_or(&not_provided);

    let files = project
        .file_structure
        .iter()
        .map(|file| format!("- {}", file.path))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate 3 different README.md files for a project with the following details:\n\n\
         Project Name: {name}\n\
         Description: {description}\n\
         Tech Stack: {tech}\n\
         Deployment URL: {deployment}\n\
         File Structure:\n{files}\n\
         Author: {author}\n\n\
         Contact details: Include the author email ({email}) and GitHub username ({github}) \
         if provided in a 'Contact' or 'Author' section.\n\n\
         Generate 3 different versions:\n\
         1. Professional and formal\n\
         2. Modern and developer-friendly\n\
         3. Minimal and clean\n\n\
         Each version should be complete and use proper markdown formatting. \
         Return them clearly separated as 'Option 1:', 'Option 2:', and 'Option 3:'.\n",
        name = project.project_name,
        description = project.description,
        tech = project.tech_stack.join(", "),
        deployment = deployment,
        files = files,
        author = author,
        email = email,
        github = github,
    )
}

/// Splits completion text on `"Option "` markers into exactly three variants
///
/// Missing sections become empty-content placeholders labeled with the
/// remaining default styles; surplus sections are dropped. Never fails.
pub fn split_variants(text: &str) -> Vec<ReadmeVariant> {
    let mut variants: Vec<ReadmeVariant> = text
        .split("Option ")
        .skip(1)
        .take(VARIANT_STYLES.len())
        .enumerate()
        .map(|(i, section)| {
            // Strip the "N:" marker left at the head of each section.
            let content = section.get(2..).unwrap_or(section);
            ReadmeVariant {
                content: content.trim().to_string(),
                style: style_for(i),
            }
        })
        .collect();

    while variants.len() < VARIANT_STYLES.len() {
        variants.push(ReadmeVariant {
            content: String::new(),
            style: style_for(variants.len()),
        });
    }
    variants
}

fn style_for(index: usize) -> String {
    VARIANT_STYLES
        .get(index)
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| format!("Style {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileEntry;
    use pretty_assertions::assert_eq;

    fn sample_project() -> ProjectDetails {
        ProjectDetails {
            project_name: "demo".to_string(),
            description: "a demo service".to_string(),
            tech_stack: vec!["Python".to_string(), "Docker".to_string()],
            deployment_url: None,
            file_structure: vec![
                FileEntry::file("app.py", Vec::new()),
                FileEntry::directory("tests"),
            ],
            functions: Vec::new(),
            author_name: Some("Ada".to_string()),
            author_email: None,
            github_username: None,
        }
    }

    #[test]
    fn test_prompt_contains_project_details() {
        let prompt = build_prompt(&sample_project());

        assert!(prompt.contains("Project Name: demo"));
        assert!(prompt.contains("Tech Stack: Python, Docker"));
        assert!(prompt.contains("Deployment URL: Not provided"));
        assert!(prompt.contains("- app.py"));
        assert!(prompt.contains("- tests"));
        assert!(prompt.contains("Author: Ada"));
        assert!(prompt.contains("'Option 1:', 'Option 2:', and 'Option 3:'"));
    }

    #[test]
    fn test_three_sections_split_in_order() {
        let text = "intro\nOption 1: First draft\nOption 2: Second draft\nOption 3: Third draft";
        let variants = split_variants(text);

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].style, "Professional");
        assert_eq!(variants[0].content, "First draft");
        assert_eq!(variants[1].style, "Modern");
        assert_eq!(variants[1].content, "Second draft");
        assert_eq!(variants[2].style, "Minimal");
        assert_eq!(variants[2].content, "Third draft");
    }

    #[test]
    fn test_missing_sections_are_padded() {
        let variants = split_variants("Option 1: only one");

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].content, "only one");
        assert_eq!(variants[1], ReadmeVariant { content: String::new(), style: "Modern".to_string() });
        assert_eq!(variants[2], ReadmeVariant { content: String::new(), style: "Minimal".to_string() });
    }

    #[test]
    fn test_no_sections_at_all() {
        let variants = split_variants("The model ignored the instructions entirely.");

        assert_eq!(variants.len(), 3);
        assert!(variants.iter().all(|v| v.content.is_empty()));
        let styles: Vec<&str> = variants.iter().map(|v| v.style.as_str()).collect();
        assert_eq!(styles, vec!["Professional", "Modern", "Minimal"]);
    }

    #[test]
    fn test_surplus_sections_are_dropped() {
        let variants = split_variants("Option 1: a\nOption 2: b\nOption 3: c\nOption 4: d");
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[2].content, "c");
    }
}
