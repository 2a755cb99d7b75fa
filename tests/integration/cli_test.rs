//! Runs the imgveil binary end to end

use super::test_harness::{run_cli, write_config, write_html, KEY, WORKER};

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[test]
fn test_check_accepts_valid_config() {
    let config = write_config(WORKER, KEY);
    let output = run_cli(&["check", "-c", path_str(config.path())], None);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "configuration OK\n");
}

#[test]
fn test_check_rejects_malformed_key() {
    let config = write_config(WORKER, "ABCDEF");
    let output = run_cli(&["check", "-c", path_str(config.path())], None);

    assert_eq!(output.status.code(), Some(78));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr
            .matches("secret_key must be 64 lowercase hex characters")
            .count(),
        1
    );
    assert!(!stderr.contains("ABCDEF"));
}

#[test]
fn test_rewrite_fail_open_with_malformed_key_echoes_input() {
    let config = write_config(WORKER, "ABCDEF");
    let html = r#"<p><img src="a.jpg"></p>"#;
    let output = run_cli(
        &["rewrite", "-c", path_str(config.path()), "--fail-open"],
        Some(html),
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), html);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("ABCDEF"));
}

#[test]
fn test_rewrite_without_fail_open_rejects_malformed_key() {
    let config = write_config(WORKER, "ABCDEF");
    let output = run_cli(&["rewrite", "-c", path_str(config.path())], None);

    assert_eq!(output.status.code(), Some(78));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_rewrite_fail_open_with_valid_key_still_rewrites() {
    let config = write_config(WORKER, KEY);
    let output = run_cli(
        &["rewrite", "-c", path_str(config.path()), "--fail-open"],
        Some(r#"<img src="a.jpg">"#),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(r#" data-cfimageproxy="true""#));
    assert!(!stdout.contains("a.jpg"));
}

#[test]
fn test_rewrite_stdin_to_stdout() {
    let config = write_config(WORKER, KEY);
    let output = run_cli(
        &["rewrite", "-c", path_str(config.path())],
        Some(r#"<p><img src="a.jpg"></p>"#),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(&format!(r#"<p><img src="{}?u="#, WORKER)));
    assert!(stdout.ends_with(r#" loading="lazy"></p>"#));
    assert!(!stdout.contains("a.jpg"));
}

#[test]
fn test_rewrite_file_to_file_then_inspect() {
    let config = write_config(WORKER, KEY);
    let (dir, input) = write_html(r#"<img alt="a" src="https://origin.test/cat.jpg">"#);
    let out_path = dir.path().join("out.html");

    let output = run_cli(
        &[
            "rewrite",
            "-c",
            path_str(config.path()),
            path_str(&input),
            "-o",
            path_str(&out_path),
        ],
        None,
    );
    assert!(output.status.success());

    let rewritten = std::fs::read_to_string(&out_path).unwrap();
    let start = rewritten.find(r#"data-original-src=""#).unwrap() + r#"data-original-src=""#.len();
    let len = rewritten[start..].find('"').unwrap();
    let original_url = &rewritten[start..start + len];

    let output = run_cli(
        &["inspect", "-c", path_str(config.path()), original_url],
        None,
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"metadata: {"maxWidth":0,"maxHeight":0,"quality":80}"#));
    assert!(stdout.contains("url: https://origin.test/cat.jpg"));
}

#[test]
fn test_url_command_prints_retina_url() {
    let config = write_config(WORKER, KEY);
    let output = run_cli(
        &[
            "url",
            "-c",
            path_str(config.path()),
            "--variant",
            "retina",
            "https://origin.test/dog.png",
        ],
        None,
    );
    assert!(output.status.success());
    let proxy_url = String::from_utf8(output.stdout).unwrap();
    let proxy_url = proxy_url.trim_end();

    let output = run_cli(&["inspect", "-c", path_str(config.path()), proxy_url], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("max_width: 2048"));
    assert!(stdout.contains("quality: 60"));
}

#[test]
fn test_rewrite_with_disabled_proxy_echoes_input() {
    let config = write_config("", "");
    let html = r#"<img src="a.jpg">"#;
    let output = run_cli(&["rewrite", "-c", path_str(config.path())], Some(html));

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), html);
}

#[test]
fn test_inspect_rejects_tampered_token() {
    let config = write_config(WORKER, KEY);
    let output = run_cli(
        &["inspect", "-c", path_str(config.path()), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"],
        None,
    );
    assert_eq!(output.status.code(), Some(65));
}
