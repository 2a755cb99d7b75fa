//! Shared helpers for integration tests

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

pub const KEY: &str = "8f1c2a3b4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8";
pub const WORKER: &str = "https://img.example.com/imgproxy/";

/// Write a config file for the given worker URL and key
pub fn write_config(worker_url: &str, secret_key: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    let yaml = format!(
        r#"
proxy:
  worker_url: "{}"
  secret_key: "{}"
  max_width: 1024
  max_height: 0
  quality: 80
  thumbnail_quality: 60
logging:
  level: warn
  format: json
"#,
        worker_url, secret_key
    );
    file.write_all(yaml.as_bytes()).expect("Failed to write config");
    file.flush().expect("Failed to flush config");
    file
}

/// Temp directory holding an HTML file
pub fn write_html(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("post.html");
    std::fs::write(&path, content).expect("Failed to write html");
    (dir, path)
}

/// Run the imgveil binary with optional stdin
pub fn run_cli(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_imgveil"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn imgveil");

    {
        let mut handle = child.stdin.take().expect("stdin is piped");
        if let Some(input) = stdin {
            handle
                .write_all(input.as_bytes())
                .expect("Failed to write stdin");
        }
    }

    child.wait_with_output().expect("Failed to wait for imgveil")
}
