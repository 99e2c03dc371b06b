//! Hygiene: source-level rules for the canvas crate, checked at test time.
//!
//! Each rule has a budget (ideally zero). The budget never grows: adding an
//! occurrence means removing another one first.

use std::fs;
use std::path::Path;

struct Rule {
    pattern: &'static str,
    budget: usize,
    label: &'static str,
}

const RULES: &[Rule] = &[
    // Panics.
    Rule { pattern: ".unwrap()", budget: 0, label: "unwrap" },
    Rule { pattern: ".expect(", budget: 0, label: "expect" },
    Rule { pattern: "panic!(", budget: 0, label: "panic" },
    Rule { pattern: "unreachable!(", budget: 0, label: "unreachable" },
    Rule { pattern: "todo!(", budget: 0, label: "todo" },
    Rule { pattern: "unimplemented!(", budget: 0, label: "unimplemented" },
    // Silent loss.
    Rule { pattern: "let _ =", budget: 0, label: "silent discard" },
    Rule { pattern: ".ok()", budget: 0, label: "dot ok" },
    // Hosts own output.
    Rule { pattern: "println!(", budget: 0, label: "println" },
    Rule { pattern: "eprintln!(", budget: 0, label: "eprintln" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, label: "allow dead_code" },
];

/// Crates the render context must never reach for: it neither does I/O nor
/// schedules work.
const FORBIDDEN_PATHS: &[&str] = &["reqwest::", "tokio::", "std::net::", "std::thread::"];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, test files excluded.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| (file.path.clone(), file.content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn report(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > rule.budget {
            failures.push(format!("{} budget exceeded: found {count}, max {}.\n{}", rule.label, rule.budget, report(&found)));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn render_context_stays_pure() {
    let files = source_files();
    let mut offenders = Vec::new();
    for path in FORBIDDEN_PATHS {
        for file in files.iter().filter(|f| f.content.contains(path)) {
            offenders.push(format!("{}: {path}", file.path));
        }
    }
    assert!(offenders.is_empty(), "I/O or scheduling in the render context:\n{}", offenders.join("\n"));
}
