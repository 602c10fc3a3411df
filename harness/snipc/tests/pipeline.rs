//! End-to-end runs over a snippet corpus on disk, with a mock checker
//! standing in for `tsc`.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use snipc::reporting::{render_summary, to_json};
use snipc::testing::MockChecker;
use snipc::{Config, Runner, RunnerConfig, XFailSet};

const NULL_MESSAGE: &str = "Type 'null' is not assignable to type 'string'.";

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A small book: project-wide options in `snip.toml`, one chapter that
/// re-enables strict null checks per snippet, one known-broken snippet.
fn corpus() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "snip.toml",
        "[checker]\ntimeout_secs = 10\n\n[checker.options]\nstrictNullChecks = false\n",
    );
    write(root, "snip-xfail.txt", "# tracked upstream\nsnippet:ch02/stale.ts\n");
    write(
        root,
        "ch01/loose.ts",
        "const s: string = null;\nconst n: number = 1;\n",
    );
    write(
        root,
        "ch02/strict.ts",
        "// tsConfig: {\"strictNullChecks\": true}\n\
         const s: string = null;\n\
         //~ Type 'null' is not assignable\n",
    );
    write(
        root,
        "ch02/stale.ts",
        "const s: string = null;\n//~ Type 'null' is not assignable\n",
    );
    write(
        root,
        "ch02/wrong.ts",
        "// tsConfig: {\"strictNullChecks\": true}\nlet t: string = null;\n",
    );
    dir
}

fn runner_for(path: &Path) -> Runner<MockChecker> {
    let config = Config::discover(path).unwrap();
    let checker = MockChecker::new().flag_under("strictNullChecks", "null", NULL_MESSAGE);
    Runner::new(
        checker,
        RunnerConfig {
            options: config.base_options().unwrap(),
            root: config.base_dir.clone(),
            ..RunnerConfig::default()
        },
    )
    .with_xfail(XFailSet::load(path))
}

#[test]
fn project_options_and_overlays_layer() {
    let dir = corpus();
    let root = dir.path().canonicalize().unwrap();
    let summary = runner_for(&root).run(&root);

    let outcomes: Vec<(&str, bool)> = summary
        .verdicts
        .iter()
        .map(|v| (v.id.as_str(), v.is_pass()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("ch01/loose.ts", true),
            ("ch02/stale.ts", false),
            ("ch02/strict.ts", true),
            ("ch02/wrong.ts", false),
        ]
    );

    assert_eq!(summary.passed, 2);
    assert_eq!(summary.mismatched, 1);
    assert_eq!(summary.expected_failures, 1);
    assert_eq!(summary.exit_code(), 1);

    let text = render_summary(&summary, false, false);
    assert!(text.contains("FAIL ch02/wrong.ts (0 matched, 0 missing, 1 unexpected)"));
    assert!(text.contains(&format!("+ 2:17-20 error: {NULL_MESSAGE}")));
    assert!(!text.contains("stale.ts"));
}

#[test]
fn ids_stay_project_relative_from_a_subdirectory() {
    let dir = corpus();
    let chapter = dir.path().canonicalize().unwrap().join("ch02");
    let summary = runner_for(&chapter).run(&chapter);

    let ids: Vec<&str> = summary.verdicts.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["ch02/stale.ts", "ch02/strict.ts", "ch02/wrong.ts"]);
    assert_eq!(summary.expected_failures, 1);
}

#[test]
fn json_report_lists_every_snippet() {
    let dir = corpus();
    let root = dir.path().canonicalize().unwrap();
    let summary = runner_for(&root).run(&root);

    let value: serde_json::Value = serde_json::from_str(&to_json(&summary).unwrap()).unwrap();
    assert_eq!(value["total"], 4);
    assert_eq!(value["expected_failures"], 1);

    let wrong = &value["snippets"][3];
    assert_eq!(wrong["id"], "ch02/wrong.ts");
    assert_eq!(wrong["unexpected"][0]["line"], 2);
    assert_eq!(wrong["unexpected"][0]["message"], NULL_MESSAGE);

    let stale = &value["snippets"][1];
    assert_eq!(stale["expected_to_fail"], true);
    assert_eq!(stale["missing"][0]["line"], 1);
}
