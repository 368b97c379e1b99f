use pdf_bulk_renamer::archive::{package, package_files, Upload};
use pdf_bulk_renamer::{Rule, Side, Summary};
use std::io::{Cursor, Read};

fn entry_names(bytes: Vec<u8>) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn digit_rule_packs_uploads_under_unique_names() {
    let uploads = vec![
        Upload::new("44.14.1_20251112.pdf", b"first".to_vec()),
        Upload::new("4414_kopi.pdf", b"second".to_vec()),
        Upload::new("uten_nummer.pdf", b"third".to_vec()),
    ];

    let packaged = package(&uploads, &Rule::Digits { max_digits: Some(4) }).unwrap();

    assert_eq!(packaged.summary(), Summary { processed: 2, skipped: 1, errored: 0 });
    assert_eq!(packaged.skipped, vec!["uten_nummer.pdf"]);
    assert_eq!(entry_names(packaged.bytes.clone()), vec!["4414.pdf", "4414_1.pdf"]);

    let mut zip = zip::ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
    let mut content = String::new();
    zip.by_name("4414_1.pdf").unwrap().read_to_string(&mut content).unwrap();
    assert_eq!(content, "second");
}

#[test]
fn files_on_disk_are_packed_and_read_failures_counted() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("0150_Oslo.pdf");
    let b = dir.path().join("0150_Sentrum.pdf");
    std::fs::write(&a, b"a").unwrap();
    std::fs::write(&b, b"b").unwrap();
    let missing = dir.path().join("0160_Borte.pdf");

    let rule = Rule::Separator {
        separator: "_".into(),
        side: Side::Before,
        keep_dots: true,
        max_length: None,
    };
    let packaged = package_files(&[a.clone(), missing, b.clone()], &rule).unwrap();

    assert_eq!(packaged.summary(), Summary { processed: 2, skipped: 0, errored: 1 });
    assert_eq!(packaged.errors[0].0, "0160_Borte.pdf");
    assert_eq!(entry_names(packaged.bytes), vec!["0150.pdf", "0150_1.pdf"]);
    // 元のファイルは変更しない
    assert!(a.exists() && b.exists());
}
