#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Path to the compiled `labs` binary for this test run.
pub fn labs_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_labs"))
}

/// `labs` with the environment scrubbed of catalog and log overrides.
pub fn labs_command() -> Command {
    let mut cmd = Command::new(labs_binary());
    cmd.env_remove("LABS_CATALOG_PATH").env_remove("LABS_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_json(output: &Output) -> Result<Value> {
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}

/// Topic fixture with one lab per topic; the lab id is the lowercase letter
/// followed by `1`.
pub fn topic_json(letter: char, category: &str, starter: bool, order: Option<i32>) -> Value {
    let lower = letter.to_ascii_lowercase();
    let mut topic = json!({
        "id": format!("topic-{lower}"),
        "letter": letter.to_string(),
        "name": format!("Topic {letter}"),
        "category": category,
        "difficulty": 3,
        "job_demand": 5,
        "time_to_mid_level": "2 weeks",
        "description": "fixture topic",
        "is_momentum_starter": starter,
        "labs": [{
            "id": format!("{lower}1"),
            "title": format!("Lab {letter}1"),
            "duration": "2 hours",
            "prereqs": [],
            "summary": "fixture lab",
            "status": "not-started"
        }]
    });
    if let Some(order) = order {
        topic["momentum_order"] = json!(order);
    }
    topic
}

pub fn catalog_json(topics: Vec<Value>) -> Value {
    json!({
        "schema_version": "labs_catalog_v1",
        "title": "Fixture Labs",
        "topics": topics
    })
}

/// Write a catalog document to a temp file that lives as long as the handle.
pub fn write_catalog(doc: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate catalog file")?;
    serde_json::to_writer_pretty(&mut file, doc)?;
    file.flush()?;
    Ok(file)
}

pub fn ids(topics: &[&labcatalog::Topic]) -> Vec<String> {
    topics.iter().map(|topic| topic.id.0.clone()).collect()
}

pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}
