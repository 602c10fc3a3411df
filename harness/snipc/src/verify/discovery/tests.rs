use super::*;
use pretty_assertions::assert_eq;
use std::fs::File;
use tempfile::tempdir;

#[test]
fn test_discover_empty_dir() {
    let dir = tempdir().unwrap();
    assert!(discover_snippets(dir.path()).is_empty());
}

#[test]
fn test_discover_snippet_kinds() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a.ts")).unwrap();
    File::create(dir.path().join("b.tsx")).unwrap();
    File::create(dir.path().join("c.js")).unwrap();
    File::create(dir.path().join("ambient.d.ts")).unwrap();
    File::create(dir.path().join("notes.md")).unwrap();

    let kinds: Vec<_> = discover_snippets(dir.path())
        .into_iter()
        .map(|f| (f.id.as_str().to_string(), f.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("a.ts".to_string(), SourceKind::Ts),
            ("b.tsx".to_string(), SourceKind::Tsx),
            ("c.js".to_string(), SourceKind::Js),
        ]
    );
}

#[test]
fn test_discover_recursive_sorted_with_relative_ids() {
    let dir = tempdir().unwrap();
    let ch2 = dir.path().join("ch02-types").join("item-07");
    let ch1 = dir.path().join("ch01-intro");
    fs::create_dir_all(&ch2).unwrap();
    fs::create_dir_all(&ch1).unwrap();
    File::create(ch2.join("types-as-sets-01.ts")).unwrap();
    File::create(ch1.join("structural-07.ts")).unwrap();

    let ids: Vec<_> = discover_snippets(dir.path())
        .into_iter()
        .map(|f| f.id.as_str().to_string())
        .collect();
    assert_eq!(
        ids,
        vec![
            "ch01-intro/structural-07.ts".to_string(),
            "ch02-types/item-07/types-as-sets-01.ts".to_string(),
        ]
    );
}

#[test]
fn test_discover_skips_hidden_and_vendor_dirs() {
    let dir = tempdir().unwrap();
    for skipped in [".git", "node_modules", "target"] {
        let sub = dir.path().join(skipped);
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("x.ts")).unwrap();
    }
    File::create(dir.path().join(".hidden.ts")).unwrap();
    File::create(dir.path().join("kept.ts")).unwrap();

    let files = discover_snippets(dir.path());
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id.as_str(), "kept.ts");
}

#[test]
fn test_discover_single_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.ts");
    File::create(&path).unwrap();

    let files = discover_snippets_in(&path);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].id.as_str(), "one.ts");
    assert!(discover_snippets_in(&dir.path().join("missing.ts")).is_empty());
}

#[test]
fn test_load_snippet_reads_overlay() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nulls.ts");
    fs::write(&path, "// tsConfig: {\"strictNullChecks\":false}\nlet x: string = null;\n").unwrap();

    let file = discover_snippets_in(&path).remove(0);
    let snippet = load_snippet(&file).unwrap();
    assert_eq!(snippet.id().as_str(), "nulls.ts");
    assert!(snippet
        .overlay()
        .is_some_and(|o| o.get("strictNullChecks").is_some()));
}

#[test]
fn test_load_missing_file_is_unreadable() {
    let dir = tempdir().unwrap();
    let file = SnippetFile::new(dir.path(), dir.path().join("gone.ts"), SourceKind::Ts);
    let err = load_snippet(&file).unwrap_err();
    assert_eq!(err.kind(), snip_diagnostic::ErrorKind::SourceUnreadable);
}

#[test]
fn test_relative_to_project_root() {
    let dir = tempdir().unwrap();
    let chapter = dir.path().join("ch01");
    fs::create_dir(&chapter).unwrap();
    File::create(chapter.join("a.ts")).unwrap();

    let file = discover_snippets_in(&chapter).remove(0);
    assert_eq!(file.id.as_str(), "a.ts");
    assert_eq!(file.relative_to(dir.path()).id.as_str(), "ch01/a.ts");
}

#[test]
fn test_unreadable_root_yields_nothing() {
    let dir = tempdir().unwrap();
    let not_a_dir = dir.path().join("notes.txt");
    fs::write(&not_a_dir, "not a directory").unwrap();
    assert!(discover_snippets(&not_a_dir).is_empty());
    assert!(discover_snippets(&dir.path().join("missing")).is_empty());
}
