use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use runclean::cleaner::{
    clean, DirectoryCleaner, EntryKind, EntryRemover, Listing, Notice, NullSink, StdRemover,
    TargetStatus,
};

/// Behaves like the real filesystem except for one entry name
struct DenyName(&'static str);

impl DenyName {
    fn check(&self, path: &Path) -> io::Result<()> {
        if path.file_name().is_some_and(|n| n == self.0) {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ))
        } else {
            Ok(())
        }
    }
}

impl EntryRemover for DenyName {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        StdRemover.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        StdRemover.remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        StdRemover.remove_dir_all(path)
    }
}

/// Real listing with a broken read and a vanished entry spliced in after the first entry
struct BrokenListing;

impl EntryRemover for BrokenListing {
    fn read_dir(&self, dir: &Path) -> io::Result<Listing> {
        let mut entries: Vec<io::Result<PathBuf>> = StdRemover.read_dir(dir)?.collect();
        entries.insert(
            1,
            Err(io::Error::new(io::ErrorKind::Other, "Input/output error")),
        );
        entries.insert(2, Err(io::Error::from(io::ErrorKind::NotFound)));
        Ok(Box::new(entries.into_iter()))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        StdRemover.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        StdRemover.remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        StdRemover.remove_dir_all(path)
    }
}

/// Create a run directory with a few files in it
fn make_run_dir(root: &Path, name: &str, files: &[&str]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    for f in files {
        fs::write(dir.join(f), format!("content of {}", f)).unwrap();
    }
    dir
}

fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

fn completed_count(notices: &[Notice]) -> usize {
    notices
        .iter()
        .filter(|n| matches!(n, Notice::Completed { .. }))
        .count()
}

#[test]
fn test_only_files_leaves_empty_target() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_default", &["css", "zk_pk", "zk_vk"]);

    let mut notices: Vec<Notice> = Vec::new();
    let report = clean(&[&target], &mut notices);

    assert!(target.is_dir(), "Target directory itself must survive");
    assert_eq!(entry_count(&target), 0);
    assert_eq!(report.targets[0].removed, 3);
    assert_eq!(completed_count(&notices), 1);
    assert_eq!(notices.len(), 1);
}

#[test]
fn test_subdirectory_tree_is_removed() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_oneCoin", &["css"]);
    let tree = target.join("proofs/round1/inner");
    fs::create_dir_all(&tree).unwrap();
    fs::write(tree.join("proof.bin"), b"proof").unwrap();
    fs::write(target.join("proofs/index"), b"idx").unwrap();

    let mut notices: Vec<Notice> = Vec::new();
    let report = clean(&[&target], &mut notices);

    assert!(!target.join("proofs").exists());
    assert!(target.is_dir());
    assert_eq!(entry_count(&target), 0);
    assert_eq!(report.targets[0].removed, 2, "Top-level entries only");
    assert_eq!(report.targets[0].status, TargetStatus::Completed);
}

#[test]
fn test_missing_target_reported_once_and_untouched() {
    let root = TempDir::new().unwrap();
    let ghost = root.path().join("_run_F3");

    let mut notices: Vec<Notice> = Vec::new();
    let report = clean(&[&ghost], &mut notices);

    assert_eq!(notices, vec![Notice::Missing { target: ghost.clone() }]);
    assert_eq!(report.missing_targets(), 1);
    assert!(!ghost.exists(), "Missing target must not be created");
    assert_eq!(entry_count(root.path()), 0);
}

#[test]
fn test_one_failing_entry_does_not_stop_the_rest() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_2coin", &["a.txt", "locked", "c.txt"]);

    let mut notices: Vec<Notice> = Vec::new();
    let report = DirectoryCleaner::new([&target])
        .with_remover(DenyName("locked"))
        .clean(&mut notices);

    assert!(!target.join("a.txt").exists());
    assert!(!target.join("c.txt").exists());
    assert!(target.join("locked").exists());

    let errors: Vec<&Notice> = notices.iter().filter(|n| n.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        *errors[0],
        Notice::EntryFailed {
            path: target.join("locked"),
            detail: "Permission denied".to_string(),
        }
    );
    assert_eq!(completed_count(&notices), 1);
    assert!(matches!(notices.last(), Some(Notice::Completed { .. })));

    let t = &report.targets[0];
    assert_eq!(t.removed, 2);
    assert_eq!(t.failed(), 1);
    assert_eq!(t.failures[0].path, target.join("locked"));
    assert_eq!(t.failures[0].error, "Permission denied");
    assert_eq!(t.failures[0].kind, Some(EntryKind::File));
}

#[test]
fn test_failing_directory_entry_is_reported() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_F2", &["keep_going"]);
    fs::create_dir_all(target.join("locked/deep")).unwrap();

    let mut notices: Vec<Notice> = Vec::new();
    let report = DirectoryCleaner::new([&target])
        .with_remover(DenyName("locked"))
        .clean(&mut notices);

    assert!(target.join("locked/deep").exists());
    assert!(!target.join("keep_going").exists());
    assert_eq!(report.total_failed(), 1);
    assert_eq!(report.targets[0].failures[0].kind, Some(EntryKind::Directory));
    assert_eq!(report.total_removed(), 1);
}

#[test]
fn test_second_run_is_quiet_but_completes() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_register", &["x", "y"]);

    clean(&[&target], &mut NullSink);

    let mut notices: Vec<Notice> = Vec::new();
    let report = clean(&[&target], &mut notices);

    assert_eq!(notices, vec![Notice::Completed { target: target.clone() }]);
    assert_eq!(report.targets[0].attempted(), 0);
    assert!(target.is_dir());
}

#[test]
fn test_empty_target_list_does_nothing() {
    let root = TempDir::new().unwrap();
    make_run_dir(root.path(), "_run_default", &["css"]);

    let mut notices: Vec<Notice> = Vec::new();
    let targets: [PathBuf; 0] = [];
    let report = clean(&targets, &mut notices);

    assert!(notices.is_empty());
    assert!(report.targets.is_empty());
    assert!(root.path().join("_run_default/css").exists());
}

#[test]
fn test_targets_processed_in_order() {
    let root = TempDir::new().unwrap();
    let first = make_run_dir(root.path(), "_run_F1", &["a"]);
    let missing = root.path().join("_run_draw");
    let last = make_run_dir(root.path(), "_run_3coin", &["b"]);

    let mut notices: Vec<Notice> = Vec::new();
    let report = clean(&[&first, &missing, &last], &mut notices);

    assert_eq!(
        notices,
        vec![
            Notice::Completed { target: first.clone() },
            Notice::Missing { target: missing.clone() },
            Notice::Completed { target: last.clone() },
        ]
    );
    let order: Vec<&PathBuf> = report.targets.iter().map(|t| &t.target).collect();
    assert_eq!(order, vec![&first, &missing, &last]);
}

#[cfg(unix)]
#[test]
fn test_symlinks_removed_without_following() {
    let root = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("precious.txt"), b"do not delete").unwrap();

    let target = make_run_dir(root.path(), "_run_F1", &[]);
    std::os::unix::fs::symlink(outside.path(), target.join("dir_link")).unwrap();
    std::os::unix::fs::symlink(
        outside.path().join("precious.txt"),
        target.join("file_link"),
    )
    .unwrap();
    std::os::unix::fs::symlink(root.path().join("nowhere"), target.join("dangling")).unwrap();

    let report = clean(&[&target], &mut NullSink);

    assert_eq!(report.targets[0].removed, 3);
    assert_eq!(entry_count(&target), 0);
    assert!(outside.path().join("precious.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_target_empties_link_destination() {
    let root = TempDir::new().unwrap();
    let real = make_run_dir(root.path(), "real", &["a", "b"]);
    let link = root.path().join("_run_default");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let report = clean(&[&link], &mut NullSink);

    assert_eq!(report.targets[0].removed, 2);
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(entry_count(&real), 0);
}

#[test]
fn test_report_counts_match_notices() {
    let root = TempDir::new().unwrap();
    let a = make_run_dir(root.path(), "a", &["1", "locked"]);
    let b = make_run_dir(root.path(), "b", &["locked", "2", "3"]);
    let c = root.path().join("c");

    let mut notices: Vec<Notice> = Vec::new();
    let report = DirectoryCleaner::new([&a, &b, &c])
        .with_remover(DenyName("locked"))
        .clean(&mut notices);

    let failures = notices
        .iter()
        .filter(|n| matches!(n, Notice::EntryFailed { .. }))
        .count();
    assert_eq!(failures, report.total_failed());
    assert_eq!(completed_count(&notices), report.completed_targets());
    assert_eq!(report.total_removed(), 3);
    assert_eq!(report.completed_targets(), 2);
    assert_eq!(report.missing_targets(), 1);
}

#[test]
fn test_listing_error_is_reported_and_iteration_continues() {
    let root = TempDir::new().unwrap();
    let target = make_run_dir(root.path(), "_run_F1", &["css", "zk_pk", "zk_vk"]);

    let mut notices: Vec<Notice> = Vec::new();
    let report = DirectoryCleaner::new([&target])
        .with_remover(BrokenListing)
        .clean(&mut notices);

    assert_eq!(entry_count(&target), 0, "Entries after the bad read still go");
    assert_eq!(
        notices,
        vec![
            Notice::EntryFailed {
                path: target.clone(),
                detail: "Input/output error".to_string(),
            },
            Notice::Completed {
                target: target.clone()
            },
        ]
    );

    let t = &report.targets[0];
    assert_eq!(t.status, TargetStatus::Completed);
    assert_eq!(t.removed, 3);
    assert_eq!(t.failed(), 1);
    assert_eq!(t.failures[0].path, target);
    assert_eq!(t.failures[0].kind, None);
    assert_eq!(t.already_absent, 0, "A vanished listing entry is not counted");
}
