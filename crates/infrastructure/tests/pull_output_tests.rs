//! Pull output decoding against scripted stand-ins for `ollama`
//!
//! Kept as a single test in its own binary: writing an executable while
//! sibling tests fork can leave it busy (ETXTBSY) when it is started.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use infrastructure::OllamaProcess;

fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

async fn pull_lines(executable: &Path) -> (Result<usize, infrastructure::ProcessError>, Vec<String>) {
    let process = OllamaProcess::new(executable);
    let mut lines = Vec::new();
    let result = process.pull("llama2", |line| lines.push(line.to_string())).await;
    (result, lines)
}

#[tokio::test]
async fn pull_output_is_decoded_leniently() {
    let dir = tempfile::tempdir().unwrap();

    // A byte that is not UTF-8, then more output after a pause
    let invalid = script(
        dir.path(),
        "invalid-utf8",
        "printf 'pulling manifest\\n'\nprintf 'bad \\377 byte\\n'\nsleep 1\nprintf 'success\\n'\n",
    );
    let (result, lines) = pull_lines(&invalid).await;
    assert_eq!(result.unwrap(), 3);
    assert_eq!(lines[0], "pulling manifest");
    assert!(lines[1].contains('\u{FFFD}'));
    assert_eq!(lines.last().map(String::as_str), Some("success"));

    // Cursor hiding, column moves and line erases around redrawn progress
    let redraw = script(
        dir.path(),
        "redraw",
        "printf '\\033[?25lpulling manifest \\033[K\\n'\n\
         printf 'pulling 10%%\\033[1Gpulling 55%%\\033[K\\n' >&2\n",
    );
    let (result, lines) = pull_lines(&redraw).await;
    assert_eq!(result.unwrap(), 2);
    assert!(lines.contains(&"pulling manifest".to_string()));
    assert!(lines.contains(&"pulling 55%".to_string()));
    assert!(lines.iter().all(|line| !line.contains('\u{1b}')));
}
