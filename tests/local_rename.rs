use pdf_bulk_renamer::local::{commit, scan_directory, CommitOptions};
use pdf_bulk_renamer::{RenameError, RenamePlan, Rule, Side, Summary};
use std::fs;
use std::path::Path;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), name.as_bytes()).unwrap();
}

fn before_rule(keep_dots: bool) -> Rule {
    Rule::Separator {
        separator: "_".into(),
        side: Side::Before,
        keep_dots,
        max_length: None,
    }
}

fn confirmed() -> CommitOptions {
    CommitOptions { dry_run: false, confirmed: true }
}

#[test]
fn scan_lists_matching_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b_2.pdf");
    touch(dir.path(), "a_1.PDF");
    touch(dir.path(), "notes.txt");
    fs::create_dir(dir.path().join("sub.pdf")).unwrap();

    let scan = scan_directory(dir.path(), "*.pdf").unwrap();
    assert_eq!(scan.names, vec!["a_1.PDF", "b_2.pdf"]);
    assert!(scan.non_utf8.is_empty());
}

#[test]
fn scan_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(
        scan_directory(&missing, "*.pdf"),
        Err(RenameError::NotADirectory(_))
    ));
}

#[test]
fn renames_batch_with_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["44.14.1_20251112.pdf", "44141_x.pdf", "_skip.pdf"] {
        touch(dir.path(), name);
    }

    let plan = scan_directory(dir.path(), "*.pdf").unwrap().plan(&before_rule(false));
    let report = commit(dir.path(), &plan, confirmed()).unwrap();

    assert_eq!(report.summary(), Summary { processed: 2, skipped: 1, errored: 0 });
    assert_eq!(report.skipped, vec!["_skip.pdf"]);
    assert_eq!(fs::read_to_string(dir.path().join("44141.pdf")).unwrap(), "44.14.1_20251112.pdf");
    assert_eq!(fs::read_to_string(dir.path().join("44141_1.pdf")).unwrap(), "44141_x.pdf");
    assert!(dir.path().join("_skip.pdf").exists());
}

#[test]
fn disk_collision_outside_batch_gets_next_free_suffix() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a_x.pdf");
    touch(dir.path(), "a_y.pdf");

    let plan = RenamePlan::build(&["a_x.pdf", "a_y.pdf"], &before_rule(true));
    assert_eq!(plan.rows[1].resolved.as_deref(), Some("a_1.pdf"));

    // プレビュー後に別のプロセスが作ったファイル
    touch(dir.path(), "a.pdf");

    let report = commit(dir.path(), &plan, confirmed()).unwrap();
    assert!(report.errors.is_empty());
    // a.pdf は既にあり、a_1.pdf はバッチ内で予約済み
    assert_eq!(report.renamed[0], ("a_x.pdf".to_string(), "a_2.pdf".to_string()));
    assert_eq!(report.renamed[1], ("a_y.pdf".to_string(), "a_1.pdf".to_string()));
    assert_eq!(fs::read_to_string(dir.path().join("a.pdf")).unwrap(), "a.pdf");
}

#[test]
fn dry_run_leaves_disk_untouched() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "x_1.pdf");

    let plan = RenamePlan::build(&["x_1.pdf"], &before_rule(true));
    let options = CommitOptions { dry_run: true, confirmed: false };
    let report = commit(dir.path(), &plan, options).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.renamed, vec![("x_1.pdf".to_string(), "x.pdf".to_string())]);
    assert!(dir.path().join("x_1.pdf").exists());
    assert!(!dir.path().join("x.pdf").exists());
}

#[test]
fn unconfirmed_rename_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "x_1.pdf");

    let plan = RenamePlan::build(&["x_1.pdf"], &before_rule(true));
    let result = commit(dir.path(), &plan, CommitOptions::default());

    assert!(matches!(result, Err(RenameError::NotConfirmed)));
    assert!(dir.path().join("x_1.pdf").exists());
}

#[test]
fn already_named_file_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "plain.pdf");

    let plan = RenamePlan::build(&["plain.pdf"], &before_rule(true));
    let report = commit(dir.path(), &plan, confirmed()).unwrap();

    assert_eq!(report.unchanged, vec!["plain.pdf"]);
    assert!(report.renamed.is_empty());
    assert!(dir.path().join("plain.pdf").exists());
    assert!(!dir.path().join("plain_1.pdf").exists());
}

#[test]
fn one_failure_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b_ok.pdf");

    // 計画にあるがディスクに無いファイルはリネームに失敗する
    let plan = RenamePlan::build(&["a_gone.pdf", "b_ok.pdf"], &before_rule(true));
    let report = commit(dir.path(), &plan, confirmed()).unwrap();

    assert_eq!(report.summary(), Summary { processed: 1, skipped: 0, errored: 1 });
    assert_eq!(report.errors[0].0, "a_gone.pdf");
    assert!(dir.path().join("b.pdf").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_are_reported_as_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "ok_1.pdf");
    let raw = OsStr::from_bytes(b"bad\xff_1.pdf");
    fs::write(dir.path().join(raw), b"x").unwrap();

    let scan = scan_directory(dir.path(), "*.pdf").unwrap();
    assert_eq!(scan.names, vec!["ok_1.pdf"]);
    assert_eq!(scan.non_utf8, vec!["bad\u{FFFD}_1.pdf"]);

    let plan = scan.plan(&before_rule(true));
    let report = commit(dir.path(), &plan, confirmed()).unwrap();

    assert_eq!(report.summary(), Summary { processed: 1, skipped: 1, errored: 0 });
    assert_eq!(report.skipped, vec!["bad\u{FFFD}_1.pdf"]);
    assert!(dir.path().join(raw).exists());
    assert!(dir.path().join("ok.pdf").exists());
}
