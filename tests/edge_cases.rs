//! Edge case and error handling tests for fsmanifest


use harness::{TestTree, child, items, read_manifest, run_fsmanifest};
use serde_json::Value;

// ============================================================================
// Ordering
// ============================================================================

/// Folders first, then case-insensitive non-decreasing names, at every level.
fn assert_ordered(node: &Value) {
    let list = items(node);
    let mut seen_item = false;
    let mut previous: Option<(bool, String)> = None;
    for entry in list {
        let is_item = entry["type"] != "folder";
        assert!(
            !(seen_item && !is_item),
            "folder after item in {}",
            node["path"]
        );
        seen_item |= is_item;

        let key = (is_item, entry["name"].as_str().unwrap().to_lowercase());
        if let Some(prev) = &previous {
            assert!(prev <= &key, "{:?} sorted before {:?}", prev, key);
        }
        previous = Some(key);

        if !is_item {
            assert_ordered(entry);
        }
    }
}

#[test]
fn test_ordering_holds_recursively() {
    let tree = TestTree::new();
    for path in [
        "zeta.txt",
        "Alpha/b.md",
        "Alpha/A.txt",
        "alpha_two/x.txt",
        "beta.MD",
        "Beta/inner/c.txt",
        "Beta/inner/B.txt",
        "Beta/a.html",
    ] {
        tree.add_file(path, "x");
    }

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);
    assert_ordered(&read_manifest(tree.path()));
}

#[test]
fn test_equal_names_keep_production_order() {
    let tree = TestTree::new();
    tree.add_file("README.md", "md");
    tree.add_file("readme.TXT", "txt");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    let types: Vec<&str> = items(&manifest)
        .iter()
        .map(|n| n["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["wordpad", "notepad"]);
}

// ============================================================================
// Inclusion
// ============================================================================

#[test]
fn test_skipped_entries() {
    let tree = TestTree::new();
    tree.add_file(".git/config", "[core]");
    tree.add_file(".hidden.md", "h");
    tree.add_file("_thumbs/cover.png", "png");
    tree.add_file("docs/_thumbs/page.png", "png");
    tree.add_file("docs/setup.exe", "MZ");
    tree.add_file("docs/Makefile", "all:");
    tree.add_file("docs/guide.md", "g");
    tree.add_file("folder.md", "root description is not listed");
    tree.add_file("folder_image.jpg", "jpg");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    assert_eq!(items(&manifest).len(), 1);
    let docs = child(&manifest, "docs");
    assert_eq!(items(docs).len(), 1);
    assert_eq!(docs["items"][0]["path"], "docs/guide.md");
}

#[test]
fn test_ignore_globs() {
    let tree = TestTree::new();
    tree.add_file("ignore.txt", "*.BAK.txt\nscratch\n[draft].txt\n");
    tree.add_file("old.bak.txt", "old");
    tree.add_file("Scratch/a.txt", "a");
    tree.add_file("[Draft].txt", "draft");
    tree.add_file("d.txt", "d");
    tree.add_file("keep.txt", "k");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    let paths: Vec<&str> = items(&manifest)
        .iter()
        .map(|n| n["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["d.txt", "keep.txt"]);
}

#[test]
fn test_ignored_folder_is_not_pruned_from_references() {
    let tree = TestTree::new();
    tree.add_file("ignore.txt", "vault\n");
    tree.add_file("references.txt", "vault/\n");
    tree.add_file("vault/gold.txt", "au");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    assert_eq!(items(&manifest).len(), 1);
    let vault = child(&manifest, "vault");
    assert_eq!(vault["reference"], "Yes");
    assert_eq!(vault["items"][0]["path"], "vault/gold.txt");
}

#[test]
fn test_empty_referenced_folder_is_omitted() {
    let tree = TestTree::new();
    tree.add_dir("nothing");
    tree.add_file("desk/references.txt", "nothing\n");
    tree.add_file("desk/a.txt", "a");

    let (_, stderr, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0, "empty target is not an error: {}", stderr);

    let manifest = read_manifest(tree.path());
    assert_eq!(items(child(&manifest, "desk")).len(), 1);
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_invalid_utf8_description() {
    let tree = TestTree::new();
    tree.add_bytes("music/folder.md", b"Caf\xe9 tunes\n");
    tree.add_file("music/song.ogg", "ogg");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    assert_eq!(child(&manifest, "music")["desc"], "Caf\u{fffd} tunes");
}

#[test]
fn test_unicode_names() {
    let tree = TestTree::new();
    tree.add_file("Musik/Größte_Hits.mp3", "mp3");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let text = std::fs::read_to_string(tree.path().join("filesystem.json")).unwrap();
    assert!(text.contains("\"name\": \"Größte Hits\""));
    assert!(text.contains("\"path\": \"Musik/Größte_Hits.mp3\""));
}

#[test]
fn test_invalid_utf8_reference_list() {
    let tree = TestTree::new();
    tree.add_bytes("desk/references.txt", b"lib\xffrary/a.txt\nlibrary/b.txt\n");
    tree.add_file("library/b.txt", "b");

    let (_, stderr, code) = run_fsmanifest(tree.path(), &["--color", "never"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("lib\u{fffd}rary/a.txt"));

    let manifest = read_manifest(tree.path());
    let desk = child(&manifest, "desk");
    assert_eq!(desk["items"][0]["path"], "library/b.txt");
}

// ============================================================================
// Loops
// ============================================================================

#[test]
fn test_reference_cycle_terminates() {
    let tree = TestTree::new();
    tree.add_file("a/references.txt", "b\n");
    tree.add_file("a/a.txt", "a");
    tree.add_file("b/references.txt", "a/\n");
    tree.add_file("b/b.txt", "b");

    let (_, stderr, code) = run_fsmanifest(tree.path(), &["--color", "never"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("reference cycle"));

    let manifest = read_manifest(tree.path());
    assert_eq!(items(&manifest).len(), 2);
}

#[test]
#[cfg(unix)]
fn test_symlink_to_parent_no_infinite_loop() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.txt", "f");
    std::os::unix::fs::symlink("..", tree.path().join("subdir/parent"))
        .expect("Failed to create parent symlink");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0, "should not hang on parent symlink");

    let manifest = read_manifest(tree.path());
    assert_eq!(items(child(&manifest, "subdir")).len(), 1);
}

#[test]
#[cfg(unix)]
fn test_broken_symlink_is_skipped() {
    let tree = TestTree::new();
    tree.add_file("real.txt", "r");
    std::os::unix::fs::symlink("nonexistent.txt", tree.path().join("broken.txt"))
        .expect("Failed to create broken symlink");

    let (_, _, code) = run_fsmanifest(tree.path(), &[]);
    assert_eq!(code, 0);

    let manifest = read_manifest(tree.path());
    assert_eq!(items(&manifest).len(), 1);
    assert_eq!(manifest["items"][0]["path"], "real.txt");
}
