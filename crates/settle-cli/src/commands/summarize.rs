use std::io::Read;
use std::path::Path;

use anyhow::Context;
use settle_core::stats::{TestResult, summarize};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummarizeArgs;
use crate::output::output;

/// Handle `settle summarize`.
pub fn handle(args: &SummarizeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = read_input(&args.input)?;
    let results: Vec<TestResult> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of test results", args.input.display()))?;

    let summary = summarize(&results);
    tracing::debug!(total = summary.total, failed = summary.failed, "summarized test results");
    output(&summary, flags.format)
}

/// Read `path`, or stdin when it is `-`.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read test results from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read test results from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::read_input;

    #[test]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"[{{"id":1,"status":"passed"}}]"#).expect("write");

        let raw = read_input(file.path()).expect("file should be readable");
        assert!(raw.contains("passed"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_input(std::path::Path::new("/definitely/not/here.json"))
            .expect_err("missing file should fail");
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
