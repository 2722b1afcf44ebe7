use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use mirror_sync::{diff, run_pass, tree, AppliedAction};
use tempfile::TempDir;

struct Trees {
    _tmp: TempDir,
    source: PathBuf,
    replica: PathBuf,
}

fn trees() -> Trees {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp = TempDir::new().expect("tempdir");
    let source = tmp.path().join("source");
    let replica = tmp.path().join("replica");
    fs::create_dir_all(&source).expect("mkdir source");
    Trees {
        _tmp: tmp,
        source,
        replica,
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn relative_paths(root: &Path) -> BTreeSet<PathBuf> {
    tree::scan(root).expect("scan").into_keys().collect()
}

fn pass(trees: &Trees) -> Vec<AppliedAction> {
    let mut applied = Vec::new();
    run_pass(&trees.source, &trees.replica, |a| applied.push(a.clone())).expect("pass");
    applied
}

#[test]
fn empty_replica_converges_after_one_pass() {
    let t = trees();
    write(&t.source, "a.txt", "alpha");
    write(&t.source, "nested/b.txt", "beta");
    write(&t.source, "nested/deeper/c.bin", "gamma");

    pass(&t);

    assert_eq!(relative_paths(&t.source), relative_paths(&t.replica));
    for rel in relative_paths(&t.source) {
        assert_eq!(
            fs::read(t.source.join(&rel)).expect("read source"),
            fs::read(t.replica.join(&rel)).expect("read replica"),
            "content mismatch for {}",
            rel.display()
        );
    }
}

#[test]
fn pass_after_sync_is_noop() {
    let t = trees();
    write(&t.source, "a.txt", "alpha");
    write(&t.source, "dir/b.txt", "beta");
    pass(&t);

    let plan = diff::plan(&t.source, &t.replica).expect("plan");
    assert!(plan.is_empty(), "expected no actions, got {plan:?}");
    assert!(pass(&t).is_empty());
}

#[test]
fn newer_source_overwrites_replica() {
    let t = trees();
    write(&t.source, "doc.txt", "v1");
    pass(&t);

    write(&t.source, "doc.txt", "version two");
    let newer = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(120));
    set_file_mtime(t.source.join("doc.txt"), newer).expect("touch source");

    let applied = pass(&t);
    assert_eq!(applied.len(), 1);
    assert_eq!(
        fs::read_to_string(t.replica.join("doc.txt")).expect("read"),
        "version two"
    );
    let replica_mtime =
        FileTime::from_last_modification_time(&fs::metadata(t.replica.join("doc.txt")).unwrap());
    assert_eq!(replica_mtime.unix_seconds(), newer.unix_seconds());
}

#[test]
fn replica_newer_than_source_is_left_alone() {
    let t = trees();
    write(&t.source, "doc.txt", "source");
    pass(&t);

    write(&t.replica, "doc.txt", "edited in replica");
    let newer = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(120));
    set_file_mtime(t.replica.join("doc.txt"), newer).expect("touch replica");

    assert!(pass(&t).is_empty());
    assert_eq!(
        fs::read_to_string(t.replica.join("doc.txt")).expect("read"),
        "edited in replica"
    );
}

#[test]
fn equal_mtime_with_different_content_is_not_copied() {
    let t = trees();
    write(&t.source, "same.txt", "aaaa");
    write(&t.replica, "same.txt", "bbbb");
    let stamp = FileTime::from_unix_time(1_700_000_000, 0);
    set_file_mtime(t.source.join("same.txt"), stamp).expect("stamp source");
    set_file_mtime(t.replica.join("same.txt"), stamp).expect("stamp replica");

    assert!(pass(&t).is_empty());
    assert_eq!(fs::read_to_string(t.replica.join("same.txt")).unwrap(), "bbbb");
}

#[test]
fn replica_only_files_are_removed() {
    let t = trees();
    write(&t.source, "keep.txt", "keep");
    write(&t.replica, "stray.txt", "stray");
    write(&t.replica, "old/nested.txt", "old");

    pass(&t);

    assert_eq!(
        relative_paths(&t.replica),
        BTreeSet::from([PathBuf::from("keep.txt")])
    );
}

#[test]
fn scenario_copy_then_remove() {
    let t = trees();
    write(&t.source, "a.txt", "hello");

    let first = pass(&t);
    assert_eq!(
        first,
        vec![AppliedAction::Copied {
            from: t.source.join("a.txt"),
            to: t.replica.join("a.txt"),
        }]
    );
    assert_eq!(fs::read_to_string(t.replica.join("a.txt")).unwrap(), "hello");

    write(&t.replica, "b.txt", "replica only");
    let second = pass(&t);
    assert_eq!(
        second.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![format!("Removed {}", t.replica.join("b.txt").display())]
    );
    assert!(!t.replica.join("b.txt").exists());
}

#[test]
fn refreshing_a_file_keeps_similarly_named_siblings() {
    let t = trees();
    write(&t.source, "a", "first");
    write(&t.source, "a.mirror.tmp", "a real file");
    pass(&t);

    write(&t.source, "a", "second");
    let newer = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(120));
    set_file_mtime(t.source.join("a"), newer).expect("touch source");

    let applied = pass(&t);
    assert_eq!(applied.len(), 1, "only `a` should be refreshed");
    assert_eq!(fs::read_to_string(t.replica.join("a")).unwrap(), "second");
    assert_eq!(
        fs::read_to_string(t.replica.join("a.mirror.tmp")).unwrap(),
        "a real file"
    );
    assert_eq!(relative_paths(&t.source), relative_paths(&t.replica));
}
