use std::path::PathBuf;
use std::process::Command;

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/docs")
}

fn run_librarian(args: &[&str]) -> (bool, String, String) {
    let librarian = env!("CARGO_BIN_EXE_librarian");
    let output = Command::new(librarian)
        .arg("--root")
        .arg(fixture_root())
        .arg("--no-sandbox")
        .args(args)
        .env_remove("LIBRARIAN_LOG")
        .output()
        .expect("Failed to run librarian");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.success(), stdout, stderr)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (success, stdout, stderr) = run_librarian(&full);
    assert!(success, "librarian failed: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

#[test]
fn list_shows_root_with_projects() {
    let (success, stdout, _) = run_librarian(&["list"]);
    assert!(success);
    assert!(stdout.contains("📁 Root"), "missing root header: {}", stdout);
    assert!(stdout.contains("  > glib/"));
    assert!(stdout.contains("  > gtk4/"));
    assert!(stdout.contains("  > libadwaita/"));
    assert!(!stdout.contains("📄 Files"));
}

#[test]
fn list_enters_a_project() {
    let (success, stdout, _) = run_librarian(&["list", "gtk4"]);
    assert!(success);
    assert!(stdout.contains("📁 gtk4"));
    assert!(stdout.contains("📄 Files (2):"));
    assert!(stdout.contains("  • class.Button.html"));
    assert!(stdout.contains("  • index.html"));
}

#[test]
fn list_cannot_escape_the_root() {
    let (success, _, stderr) = run_librarian(&["list", ".."]);
    assert!(!success);
    assert!(stderr.contains("not found"), "unexpected stderr: {}", stderr);

    let (success, _, _) = run_librarian(&["list", "gtk4/../../.."]);
    assert!(!success);
}

#[test]
fn list_of_unknown_directory_fails() {
    let (success, _, stderr) = run_librarian(&["list", "gtk5"]);
    assert!(!success);
    assert!(stderr.contains("'gtk5' not found"), "unexpected stderr: {}", stderr);
}

#[test]
fn projects_are_sorted() {
    let value = run_json(&["projects"]);
    assert_eq!(value, serde_json::json!(["glib", "gtk4", "libadwaita"]));
}

#[test]
fn project_summary_counts_files() {
    let (success, stdout, _) = run_librarian(&["project", "gtk4"]);
    assert!(success);
    assert!(stdout.contains("📊 Project: gtk4"));
    assert!(stdout.contains("Html Files: 2"));
    assert!(stdout.contains("Markdown Files: 0"));
    assert!(stdout.contains("Index File: index.html"));

    let value = run_json(&["project", "glib"]);
    assert_eq!(value["markdown_files"], 1);
    assert_eq!(value["other_files"], 1);
    assert!(value["index_file"].is_null());
}

#[test]
fn unknown_project_is_reported() {
    let (success, _, stderr) = run_librarian(&["project", "gtk5"]);
    assert!(!success);
    assert!(stderr.contains("Project 'gtk5' not found"));
}

#[test]
fn search_matches_file_names_case_insensitively() {
    let (success, stdout, _) = run_librarian(&["search", "button"]);
    assert!(success);
    assert!(stdout.contains("(1 found)"));
    assert!(stdout.contains("gtk4/class.Button.html"));
}

#[test]
fn search_reports_truncation() {
    let value = run_json(&["search", "index", "--limit", "1"]);
    assert_eq!(value["matches"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["truncated"], true);

    let (_, stdout, _) = run_librarian(&["search", "index", "-l", "1"]);
    assert!(stdout.contains("... (limited to 1 results)"));
}

#[test]
fn info_reports_html_title() {
    let (success, stdout, _) = run_librarian(&["info", "gtk4/class.Button.html"]);
    assert!(success);
    assert!(stdout.contains("📋 File Info: gtk4/class.Button.html"));
    assert!(stdout.contains("Type: .html"));
    assert!(stdout.contains("Title: Gtk.Button"));

    let value = run_json(&["info", "glib/README.md"]);
    assert_eq!(value["kind"], ".md");
    assert!(value.get("title").is_none());
}

#[test]
fn show_renders_html_as_text() {
    let (success, stdout, _) = run_librarian(&["show", "gtk4/index.html"]);
    assert!(success);
    assert!(stdout.contains("GTK 4"));
    assert!(stdout.contains("The GTK toolkit & friends."));
    assert!(!stdout.contains("<p>"));
    assert!(!stdout.contains("do not show"));
    assert!(!stdout.contains("color: black"));
}

#[test]
fn show_raw_and_cat_print_source() {
    let (success, raw, _) = run_librarian(&["show", "gtk4/index.html", "--raw"]);
    assert!(success);
    assert!(raw.contains("<p>The GTK toolkit &amp; friends.</p>"));

    let (success, cat, _) = run_librarian(&["cat", "gtk4/index.html"]);
    assert!(success);
    assert_eq!(raw, cat);
}

#[test]
fn show_limits_lines() {
    let (success, stdout, _) = run_librarian(&["show", "glib/notes.txt", "-n", "2"]);
    assert!(success);
    assert_eq!(stdout, "line one\nline two\n");
}

#[test]
fn show_rejects_directories_and_escapes() {
    let (success, _, stderr) = run_librarian(&["show", "gtk4"]);
    assert!(!success);
    assert!(stderr.contains("'gtk4' is not a file"));

    let (success, _, _) = run_librarian(&["cat", "../../integration.rs"]);
    assert!(!success);
}

#[test]
fn grep_respects_case_flag() {
    let (success, stdout, _) = run_librarian(&["grep", "signal"]);
    assert!(success);
    assert!(stdout.contains("gtk4/class.Button.html:5:"));
    assert!(!stdout.contains("glib/README.md"));

    let (success, stdout, _) = run_librarian(&["grep", "signal", "-i"]);
    assert!(success);
    assert!(stdout.contains("glib/README.md:4:Signal handling lives in GObject."));
    assert!(stdout.contains("gtk4/class.Button.html:5:"));
}

#[test]
fn grep_prints_context_lines() {
    let (success, stdout, _) = run_librarian(&["grep", "two", "-C", "1"]);
    assert!(success);
    assert!(stdout.contains("glib/notes.txt:2:line two"));
    assert!(stdout.contains("  1: line one"));
    assert!(stdout.contains("  3: line three"));
}

#[test]
fn grep_stops_at_limit() {
    let value = run_json(&["grep", "html", "--limit", "2"]);
    assert_eq!(value["matches"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["limit_reached"], true);

    let (_, stdout, _) = run_librarian(&["grep", "html", "-l", "2"]);
    assert!(stdout.contains("...Reached result limit of 2"));
}

#[test]
fn grep_without_matches_says_so() {
    let (success, stdout, _) = run_librarian(&["grep", "no-such-text-anywhere"]);
    assert!(success);
    assert!(stdout.contains("No matches found"));
}

#[test]
fn grep_with_invalid_regex_fails() {
    let (success, _, stderr) = run_librarian(&["grep", "("]);
    assert!(!success);
    assert!(stderr.contains("Invalid pattern"));
}

#[test]
fn missing_root_is_reported_without_sandbox() {
    let output = Command::new(env!("CARGO_BIN_EXE_librarian"))
        .args(["--root", "/nonexistent/librarian-docs", "--no-sandbox", "projects"])
        .output()
        .expect("Failed to run librarian");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Documentation directory /nonexistent/librarian-docs not found"));
}
