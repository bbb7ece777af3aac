use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use url::Url;

/// Rows in the hosted table layout, deliberately out of order.
pub const LINKS_JSON: &str = r#"[
    {"id": 2, "links": "/b.png", "arweave_link": "https://x", "created_at": "2024-05-01T10:00:00Z"},
    {"id": 1, "links": "/a.png", "arweave_link": null, "created_at": "2024-05-02T10:00:00Z"}
]"#;

/// Turn a directory into a file:// store URL.
pub fn file_store_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

fn cli_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_polaroid"));
    cmd.args(args);
    cmd.env_remove("POLAROID_STORE_URL");
    cmd.env_remove("POLAROID_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI binary with arguments and an isolated environment.
pub fn run_cli(args: &[&str]) -> Output {
    cli_command(args).output().expect("Failed to execute CLI")
}

/// Start a long-running CLI command, returning the child and a channel
/// that yields its stdout line by line.
pub fn spawn_cli(args: &[&str]) -> (Child, Receiver<String>) {
    let mut child = cli_command(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI");

    let stdout = child.stdout.take().expect("stdout is piped");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    (child, rx)
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str]) -> String {
    let output = run_cli(args);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
