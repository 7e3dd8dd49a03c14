use std::path::{Path, PathBuf};
use std::process::Command;

const MAX_LINES: usize = 750;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/main");
    println!("cargo:rerun-if-changed=.git/packed-refs");
    println!("cargo:rerun-if-changed=roster.yaml");

    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TASK_TRACKER_GIT_SHA={}", sha);

    enforce_line_limits();
}

/// Fails the build when a source file under `src/` grows past `MAX_LINES`
/// non-empty lines.
fn enforce_line_limits() {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let src = PathBuf::from(&manifest_dir).join("src");

    let mut files = Vec::new();
    walk_directory(&src, &mut files);

    let mut violations = Vec::new();
    for file in &files {
        println!("cargo:rerun-if-changed={}", file.display());
        match std::fs::read_to_string(file) {
            Ok(content) => {
                let lines = content.lines().filter(|l| !l.trim().is_empty()).count();
                if lines > MAX_LINES {
                    violations.push((file.clone(), lines));
                }
            }
            Err(e) => println!(
                "cargo:warning=Could not read file {}: {}",
                file.display(),
                e
            ),
        }
    }

    if !violations.is_empty() {
        for (path, lines) in &violations {
            eprintln!(
                "  {} - {} lines (exceeds by {})",
                path.display(),
                lines,
                lines - MAX_LINES
            );
        }
        panic!(
            "Build failed: {} file(s) exceed the {} line limit",
            violations.len(),
            MAX_LINES
        );
    }
}

fn walk_directory(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk_directory(&path, files);
        } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            files.push(path);
        }
    }
}
