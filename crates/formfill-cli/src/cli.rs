//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Extract data from scanned documents and fill a web form with it.
#[derive(Debug, Parser)]
#[command(name = "formfill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Document files to process (PDFs)
    #[arg(short, long, num_args = 1.., required = true)]
    pub documents: Vec<PathBuf>,

    /// Name of the target form in the mapping configuration
    #[arg(short, long)]
    pub form: String,

    /// Scratch directory for intermediate OCR artifacts
    #[arg(long = "temp-dir", default_value = "temp/")]
    pub temp_dir: PathBuf,

    /// Directory holding prompts.toml and form_mappings.toml
    #[arg(long = "config-dir", default_value = "config/")]
    pub config_dir: PathBuf,

    /// Run extraction and consolidation but do not open a browser
    #[arg(long)]
    pub skip_fill: bool,

    /// Gemini API key; read from the environment when not passed
    #[arg(long = "api-key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// WebDriver server to drive the browser through
    #[arg(long = "webdriver-url", default_value = "http://localhost:9515")]
    pub webdriver_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let cli = Cli::parse_from(["formfill", "-d", "a.pdf", "b.pdf", "-f", "test_form"]);
        assert_eq!(cli.documents.len(), 2);
        assert_eq!(cli.form, "test_form");
        assert_eq!(cli.temp_dir, PathBuf::from("temp/"));
        assert_eq!(cli.config_dir, PathBuf::from("config/"));
        assert!(!cli.skip_fill);
        assert_eq!(cli.webdriver_url, "http://localhost:9515");
    }

    #[test]
    fn test_documents_are_required() {
        let result = Cli::try_parse_from(["formfill", "-f", "test_form"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_flag_beats_environment() {
        let cli = Cli::parse_from([
            "formfill", "-d", "a.pdf", "-f", "test_form", "--api-key", "secret",
        ]);
        assert_eq!(cli.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "formfill",
            "-d",
            "a.pdf",
            "-f",
            "test_form",
            "--temp-dir",
            "/tmp/scratch",
            "--skip-fill",
            "--webdriver-url",
            "http://localhost:4444",
        ]);
        assert_eq!(cli.temp_dir, PathBuf::from("/tmp/scratch"));
        assert!(cli.skip_fill);
        assert_eq!(cli.webdriver_url, "http://localhost:4444");
    }
}
