//! アップロードファイルのZIP作成 - 元のファイルは変更しない

use crate::batch::{RenamePlan, Summary};
use crate::error::{RenameError, Result};
use crate::local::SAMPLE_ERRORS;
use crate::naming::Rule;
use serde::Serialize;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ダウンロード時の既定ファイル名
pub const DEFAULT_ARCHIVE_NAME: &str = "renamed_pdfs.zip";

/// メモリ上のアップロードファイル
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }

    /// ファイルを読み込む
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                RenameError::io(
                    format!("ファイル名を取得できません: {:?}", path),
                    std::io::ErrorKind::InvalidInput.into(),
                )
            })?
            .to_string();
        let bytes = std::fs::read(path)
            .map_err(|e| RenameError::io(format!("ファイルの読み込みに失敗: {:?}", path), e))?;
        Ok(Self { name, bytes })
    }
}

/// 作成済みZIP
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackagedArchive {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// (旧名, ZIP内の名前)
    pub written: Vec<(String, String)>,
    pub skipped: Vec<String>,
    pub errors: Vec<(String, String)>,
}

impl PackagedArchive {
    /// 読み込めなかったファイルをエラーとして先頭に追加
    pub fn with_read_errors(mut self, read_errors: Vec<(String, String)>) -> Self {
        self.errors.splice(0..0, read_errors);
        self
    }

    pub fn errors_sample(&self) -> &[(String, String)] {
        &self.errors[..self.errors.len().min(SAMPLE_ERRORS)]
    }

    pub fn summary(&self) -> Summary {
        Summary {
            processed: self.written.len(),
            skipped: self.skipped.len(),
            errored: self.errors.len(),
        }
    }
}

/// ファイルを読み込む。失敗は (ファイル名, エラー内容) として返す
pub fn read_uploads<P: AsRef<Path>>(paths: &[P]) -> (Vec<Upload>, Vec<(String, String)>) {
    let mut uploads = Vec::with_capacity(paths.len());
    let mut errors = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match Upload::from_path(path) {
            Ok(upload) => uploads.push(upload),
            Err(e) => {
                tracing::warn!(file = ?path, error = %e, "ファイルの読み込みに失敗");
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                errors.push((name, e.to_string()));
            }
        }
    }

    (uploads, errors)
}

/// パスを読み込んでZIPにまとめる。読み込みエラーも件数に含める
pub fn package_files<P: AsRef<Path>>(paths: &[P], rule: &Rule) -> Result<PackagedArchive> {
    let (uploads, read_errors) = read_uploads(paths);
    Ok(package(&uploads, rule)?.with_read_errors(read_errors))
}

/// アップロードファイルを新しい名前でZIPにまとめる
pub fn package(uploads: &[Upload], rule: &Rule) -> Result<PackagedArchive> {
    let names: Vec<&str> = uploads.iter().map(|u| u.name.as_str()).collect();
    let plan = RenamePlan::build(&names, rule);
    package_plan(uploads, &plan)
}

/// 作成済みの計画でZIPを作成（`uploads` と `plan.rows` は同じ順序）
pub fn package_plan(uploads: &[Upload], plan: &RenamePlan) -> Result<PackagedArchive> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut archive = PackagedArchive::default();

    for (upload, row) in uploads.iter().zip(&plan.rows) {
        let Some(resolved) = row.resolved.as_deref() else {
            archive.skipped.push(upload.name.clone());
            continue;
        };

        let result = writer
            .start_file(resolved, options)
            .map_err(RenameError::from)
            .and_then(|()| {
                writer
                    .write_all(&upload.bytes)
                    .map_err(|e| RenameError::io("ZIPへの書き込みに失敗", e))
            });

        match result {
            Ok(()) => archive.written.push((upload.name.clone(), resolved.to_string())),
            Err(e) => {
                tracing::warn!(file = %upload.name, error = %e, "ZIPエントリの作成に失敗");
                archive.errors.push((upload.name.clone(), e.to_string()));
            }
        }
    }

    archive.bytes = writer.finish()?.into_inner();
    tracing::info!(
        written = archive.written.len(),
        skipped = archive.skipped.len(),
        bytes = archive.bytes.len(),
        "ZIPを作成"
    );
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::Side;
    use std::io::Read;

    #[test]
    fn writes_entries_under_resolved_names() {
        let uploads = vec![
            Upload::new("0150_Oslo.pdf", b"one".to_vec()),
            Upload::new("0150_Sentrum.pdf", b"two".to_vec()),
            Upload::new("_empty.pdf", b"three".to_vec()),
        ];
        let rule = Rule::Separator {
            separator: "_".into(),
            side: Side::Before,
            keep_dots: true,
            max_length: None,
        };

        let packaged = package(&uploads, &rule).unwrap();
        assert_eq!(packaged.summary(), Summary { processed: 2, skipped: 1, errored: 0 });

        let mut zip = zip::ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
        assert_eq!(zip.len(), 2);

        let mut content = String::new();
        zip.by_name("0150_1.pdf").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "two");
        assert!(zip.by_name("0150.pdf").is_ok());
    }

    #[test]
    fn unreadable_files_count_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("0150_Oslo.pdf");
        std::fs::write(&ok, b"pdf").unwrap();
        let missing = dir.path().join("0151_Gone.pdf");

        let packaged = package_files(&[ok, missing], &Rule::default()).unwrap();

        assert_eq!(packaged.summary(), Summary { processed: 1, skipped: 0, errored: 1 });
        assert_eq!(packaged.errors[0].0, "0151_Gone.pdf");
        assert_eq!(packaged.errors_sample().len(), 1);
        let zip = zip::ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
        assert_eq!(zip.len(), 1);
    }

    #[test]
    fn empty_upload_list_gives_empty_archive() {
        let packaged = package(&[], &Rule::default()).unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }
}
