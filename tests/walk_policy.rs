mod common;
use crate::common::{collect, init_tracing, MockTreeBuilder, TestResult};

use dirview::errors::DirviewError;
use dirview::types::UnreadableDirPolicy;
use dirview::view::{DirectoryView, ViewOptions};

#[test]
fn traversal_is_preorder_in_listing_order() -> TestResult {
    init_tracing();

    let (fs, root) = MockTreeBuilder::new("/proj")
        .file("d1/f1", "1")
        .file("top.txt", "t")
        .file("d2/f2", "2")
        .file("d1/sub/f3", "3")
        .build();

    let view = DirectoryView::with_options(fs, &root, ViewOptions::default())?;

    assert_eq!(
        collect(view.files()),
        vec!["top.txt", "d1/f1", "d1/sub/f3", "d2/f2"]
    );
    assert_eq!(collect(view.subdirs()), vec!["d1", "d2", "d1/sub"]);

    let dirs: Vec<_> = collect(view.walk()).into_iter().map(|e| e.dir).collect();
    assert_eq!(
        dirs,
        vec![
            root.clone(),
            root.join("d1"),
            root.join("d1/sub"),
            root.join("d2"),
        ]
    );

    Ok(())
}

#[test]
fn sort_entries_orders_listings_by_name() -> TestResult {
    let (fs, root) = MockTreeBuilder::new("/proj")
        .file("z.txt", "z")
        .file("a.txt", "a")
        .build();

    let view = DirectoryView::with_options(fs.clone(), &root, ViewOptions::default())?;
    assert_eq!(collect(view.files()), vec!["z.txt", "a.txt"]);

    let options = ViewOptions {
        sort_entries: true,
        ..ViewOptions::default()
    };
    let view = DirectoryView::with_options(fs, &root, options)?;
    assert_eq!(collect(view.files()), vec!["a.txt", "z.txt"]);

    Ok(())
}

#[test]
fn excluded_directories_are_never_visited() -> TestResult {
    init_tracing();

    let (fs, root) = MockTreeBuilder::new("/proj")
        .file("node_modules/pkg/index.js", "x")
        .file("src/lib.rs", "x")
        .file(".git/objects/ab/cdef", "x")
        .build();

    let options = ViewOptions {
        base_excludes: vec![".git/".to_string(), "node_modules/".to_string()],
        ..ViewOptions::default()
    };
    let view = DirectoryView::with_options(fs, &root, options)?;

    for entry in collect(view.walk()) {
        assert!(!entry.dir.starts_with(root.join("node_modules")));
        assert!(!entry.dir.starts_with(root.join(".git")));
    }
    assert_eq!(collect(view.files()), vec!["src/lib.rs"]);

    Ok(())
}

#[test]
fn unreadable_subdirectory_is_skipped_by_default() -> TestResult {
    init_tracing();

    let (fs, root) = MockTreeBuilder::new("/proj")
        .file("a/x.txt", "x")
        .file("locked/y.txt", "y")
        .deny("locked")
        .build();

    let view = DirectoryView::with_options(fs, &root, ViewOptions::default())?;

    assert_eq!(collect(view.files()), vec!["a/x.txt"]);
    // Still listed by its parent; only its contents are unreachable.
    assert_eq!(collect(view.subdirs()), vec!["a", "locked"]);
    assert!(view.hash().is_ok());

    Ok(())
}

#[test]
fn unreadable_subdirectory_aborts_when_configured() -> TestResult {
    init_tracing();

    let (fs, root) = MockTreeBuilder::new("/proj")
        .file("a/x.txt", "x")
        .file("locked/y.txt", "y")
        .file("z/after.txt", "z")
        .deny("locked")
        .build();

    let options = ViewOptions {
        unreadable_dirs: UnreadableDirPolicy::Abort,
        ..ViewOptions::default()
    };
    let view = DirectoryView::with_options(fs, &root, options)?;

    let results: Vec<_> = view.files().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().ok().map(String::as_str), Some("a/x.txt"));
    match &results[1] {
        Err(DirviewError::Traversal { path, .. }) => assert_eq!(path, &root.join("locked")),
        other => panic!("expected Traversal error, got {other:?}"),
    }

    assert!(matches!(view.hash(), Err(DirviewError::Traversal { .. })));

    Ok(())
}

#[test]
fn unreadable_root_is_an_error_under_any_policy() -> TestResult {
    init_tracing();

    let tree = MockTreeBuilder::new("/proj").file("a.txt", "a");
    let mock = tree.mock();
    let (fs, root) = tree.build();
    mock.deny(&root);

    let view = DirectoryView::with_options(fs, &root, ViewOptions::default())?;

    let mut walk = view.walk();
    assert!(matches!(walk.next(), Some(Err(DirviewError::Traversal { .. }))));
    assert!(walk.next().is_none());
    assert!(view.hash().is_err());

    Ok(())
}

#[test]
fn each_walk_starts_from_the_root_again() -> TestResult {
    let tree = MockTreeBuilder::new("/proj").file("a.txt", "a");
    let mock = tree.mock();
    let (fs, root) = tree.build();

    let view = DirectoryView::with_options(fs, &root, ViewOptions::default())?;
    assert_eq!(collect(view.files()), vec!["a.txt"]);

    mock.add_file(root.join("b/c.txt"), "c");
    mock.remove(root.join("a.txt"));
    assert_eq!(collect(view.files()), vec!["b/c.txt"]);

    Ok(())
}

#[test]
fn unfiltered_options_report_everything() -> TestResult {
    let (fs, root) = MockTreeBuilder::new("/proj")
        .file(".git/config", "x")
        .file(".exclude", "*")
        .build();

    let view = DirectoryView::with_options(fs, &root, ViewOptions::unfiltered())?;

    assert!(view.patterns().is_empty());
    assert_eq!(collect(view.files()), vec![".exclude", ".git/config"]);

    Ok(())
}
