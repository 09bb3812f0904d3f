//! The `quizrun init` command.

use anyhow::Result;

use quizrun_sources::embedded::DEFAULT_BANK;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizrun.toml").exists() {
        println!("quizrun.toml already exists, skipping.");
    } else {
        std::fs::write("quizrun.toml", SAMPLE_CONFIG)?;
        println!("Created quizrun.toml");
    }

    if std::path::Path::new("questions.json").exists() {
        println!("questions.json already exists, skipping.");
    } else {
        std::fs::write("questions.json", DEFAULT_BANK)?;
        println!("Created questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions.json with your own questions");
    println!("  2. Run: quizrun validate --questions questions.json");
    println!("  3. Run: quizrun run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

shuffle = true
# seed = 42
invalid_questions = "skip"
request_timeout_secs = 10
output_dir = "./quizrun-results"

# Sources are tried in order until one yields a question bank.
[[sources]]
type = "file"
path = "questions.json"

# [[sources]]
# type = "http"
# url = "https://example.com/questions.json"

[[sources]]
type = "embedded"
"#;
