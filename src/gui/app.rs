//! メインアプリケーションウィンドウ

use crate::archive::{package_plan, read_uploads, PackagedArchive, Upload, DEFAULT_ARCHIVE_NAME};
use crate::batch::{RenamePlan, Summary};
use crate::config::Settings;
use crate::local::{commit, scan_directory, CommitOptions, RenameReport, SAMPLE_ERRORS};
use crate::naming::{Rule, Side};
use anyhow::{Context, Result};
use eframe::egui;
use egui::{CentralPanel, RichText, Vec2};
use egui_extras::{Column, TableBuilder};
use std::path::PathBuf;

use super::theme::{dark_theme, japanese_fonts, Colors};

/// ルールの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    Separator,
    Digits,
}

/// 読み込んだローカルフォルダのプレビュー
struct LocalPreview {
    folder: PathBuf,
    plan: RenamePlan,
}

/// アプリケーション状態
pub struct RenamerApp {
    /// フォルダ（入力欄）
    folder: String,
    pattern: String,
    rule_kind: RuleKind,
    separator: String,
    side: Side,
    keep_dots: bool,
    max_length: usize,
    max_digits: usize,
    dry_run: bool,
    /// バックアップ確認
    confirm_backup: bool,
    /// ローカルフォルダのプレビュー
    preview: Option<LocalPreview>,
    /// 最後のリネーム結果
    report: Option<RenameReport>,
    /// ドロップされたファイル
    uploads: Vec<Upload>,
    /// 読み込めなかったファイル (名前, エラー内容)
    read_errors: Vec<(String, String)>,
    /// ステータスメッセージ
    status: String,
    /// エラーメッセージ
    error: Option<String>,
}

impl RenamerApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            folder: settings
                .directory
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            pattern: settings.pattern,
            rule_kind: RuleKind::Separator,
            separator: settings.separator,
            side: settings.side,
            keep_dots: settings.keep_dots,
            max_length: settings.max_length,
            max_digits: 0,
            dry_run: settings.dry_run,
            confirm_backup: false,
            preview: None,
            report: None,
            uploads: Vec::new(),
            read_errors: Vec::new(),
            status: "フォルダを読み込むか、PDFファイルをドロップして開始".to_string(),
            error: None,
        }
    }

    /// 現在の設定からルールを作成
    fn rule(&self) -> Rule {
        match self.rule_kind {
            RuleKind::Separator => Rule::Separator {
                separator: self.separator.clone(),
                side: self.side,
                keep_dots: self.keep_dots,
                max_length: (self.max_length > 0).then_some(self.max_length),
            },
            RuleKind::Digits => Rule::Digits {
                max_digits: (self.max_digits > 0).then_some(self.max_digits),
            },
        }
    }

    /// フォルダを読み込んでプレビューを作成
    fn load_folder(&mut self) {
        self.report = None;
        self.error = None;

        let folder = PathBuf::from(self.folder.trim());
        match scan_directory(&folder, &self.pattern) {
            Ok(scan) => {
                let plan = scan.plan(&self.rule());
                let summary = plan.summary();
                self.status = format!("ファイル数: {} — スキップ: {}", plan.len(), summary.skipped);
                self.preview = Some(LocalPreview { folder, plan });
            }
            Err(e) => {
                self.preview = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// プレビュー済みの計画でリネーム
    fn rename_local(&mut self) {
        let Some(preview) = &self.preview else {
            return;
        };
        let options = CommitOptions {
            dry_run: self.dry_run,
            confirmed: self.confirm_backup,
        };

        match commit(&preview.folder, &preview.plan, options) {
            Ok(report) => {
                self.status = format!("{} (dry_run={})", summary_text(&report.summary()), report.dry_run);
                self.report = Some(report);
                // ディスクの状態が変わったのでプレビューは無効
                if !self.dry_run {
                    self.preview = None;
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// ドロップまたは選択されたファイルを追加
    fn add_uploads(&mut self, files: Vec<PathBuf>) {
        let pdfs: Vec<PathBuf> = files
            .into_iter()
            .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("pdf")))
            .collect();

        let (uploads, read_errors) = read_uploads(&pdfs);
        self.uploads.extend(uploads);
        self.read_errors.extend(read_errors);
        self.status = format!(
            "アップロード: {} 件 (読み込みエラー: {} 件)",
            self.uploads.len(),
            self.read_errors.len()
        );
    }

    /// ZIPを作成（読み込みエラーも件数に含める）
    fn package_uploads(&self, plan: &RenamePlan) -> crate::error::Result<PackagedArchive> {
        Ok(package_plan(&self.uploads, plan)?.with_read_errors(self.read_errors.clone()))
    }

    /// アップロードファイルのZIPを保存
    fn save_zip(&mut self, plan: &RenamePlan) {
        let Some(target) = rfd::FileDialog::new()
            .set_file_name(DEFAULT_ARCHIVE_NAME)
            .add_filter("ZIP", &["zip"])
            .save_file()
        else {
            return;
        };

        let result = self
            .package_uploads(plan)
            .context("ZIP作成に失敗")
            .and_then(|packaged| {
                std::fs::write(&target, &packaged.bytes)
                    .with_context(|| format!("ZIPの保存に失敗: {:?}", target))?;
                Ok(packaged)
            });

        match result {
            Ok(packaged) => {
                self.status = format!("ZIP保存: {} — {}", target.display(), summary_text(&packaged.summary()));
                if let Some((old, err)) = packaged.errors.first() {
                    self.error = Some(format!("{}: {}", old, err));
                }
            }
            Err(e) => self.error = Some(format!("{:#}", e)),
        }
    }

    fn rule_settings(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.rule_kind, RuleKind::Separator, "区切り文字で分割");
            ui.radio_value(&mut self.rule_kind, RuleKind::Digits, "数字を抽出 (最初の _ より前)");
        });

        match self.rule_kind {
            RuleKind::Separator => {
                ui.horizontal(|ui| {
                    ui.label("区切り文字");
                    ui.add(egui::TextEdit::singleline(&mut self.separator).char_limit(3).desired_width(50.0));
                    ui.radio_value(&mut self.side, Side::Before, "前を使う");
                    ui.radio_value(&mut self.side, Side::After, "後を使う");
                });
                ui.horizontal(|ui| {
                    ui.label("先頭N文字 (0 = すべて)");
                    ui.add(egui::DragValue::new(&mut self.max_length).range(0..=255));
                    ui.checkbox(&mut self.keep_dots, "点 (.) を残す");
                });
            }
            RuleKind::Digits => {
                ui.horizontal(|ui| {
                    ui.label("最大桁数 (0 = すべて)");
                    ui.add(egui::DragValue::new(&mut self.max_digits).range(0..=64));
                    ui.label(RichText::new("出力拡張子は常に .pdf").color(Colors::TEXT_SECONDARY));
                });
            }
        }
    }

    fn local_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("ローカルフォルダ").size(16.0).color(Colors::TEXT_PRIMARY));

        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.folder).hint_text("フォルダのパス").desired_width(360.0));
            if ui.button("📁 選択").clicked() {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    self.folder = dir.display().to_string();
                }
            }
            ui.add(egui::TextEdit::singleline(&mut self.pattern).desired_width(80.0));
            if ui.button("読み込み").clicked() {
                self.load_folder();
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.dry_run, "ドライラン (変更しない)");
            ui.checkbox(&mut self.confirm_backup, "バックアップを取りました");
        });

        let Some(preview) = &self.preview else {
            return;
        };

        ui.push_id("local_preview", |ui| preview_table(ui, &preview.plan, 260.0));

        ui.horizontal(|ui| {
            let can_rename = self.confirm_backup || self.dry_run;
            if ui
                .add_enabled(can_rename, egui::Button::new("リネーム実行"))
                .clicked()
            {
                self.rename_local();
            }
            if let Some(folder) = self.preview.as_ref().map(|p| p.folder.clone()) {
                if ui.button("📁 フォルダを開く").clicked() {
                    if let Err(e) = open::that(&folder) {
                        self.error = Some(e.to_string());
                    }
                }
            }
        });
    }

    fn report_section(&self, ui: &mut egui::Ui) {
        let Some(report) = &self.report else {
            return;
        };

        ui.label(RichText::new(summary_text(&report.summary())).color(Colors::SUCCESS));
        for (old, new) in report.renamed_sample() {
            ui.label(RichText::new(format!("{} → {}", old, new)).size(13.0).color(Colors::TEXT_SECONDARY));
        }
        if !report.skipped.is_empty() {
            ui.label(RichText::new("スキップ（候補名なし）:").color(Colors::WARNING));
            for old in report.skipped_sample() {
                ui.label(RichText::new(old).size(13.0).color(Colors::TEXT_SECONDARY));
            }
        }
        if !report.errors.is_empty() {
            ui.label(RichText::new("リネームエラー:").color(Colors::ERROR));
            for (old, err) in report.errors_sample() {
                ui.label(RichText::new(format!("{}: {}", old, err)).size(13.0).color(Colors::ERROR));
            }
        }
    }

    fn upload_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("ドラッグ＆ドロップ → ZIP").size(16.0).color(Colors::TEXT_PRIMARY));

        let is_hovering = !ui.ctx().input(|i| i.raw.hovered_files.is_empty());
        let (frame_color, bg_color) = if is_hovering {
            (Colors::ACCENT, Colors::BG_HOVER)
        } else {
            (Colors::BORDER, Colors::BG_CARD)
        };

        let drop_zone = egui::Frame::new()
            .fill(bg_color)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .corner_radius(16.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_min_size(Vec2::new(ui.available_width(), 90.0));
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(if is_hovering { "📥" } else { "📄" }).size(40.0));
                    ui.label(RichText::new("PDFファイルをここにドロップ（元のファイルは変更しません）")
                        .color(Colors::TEXT_PRIMARY));
                    ui.label(RichText::new("または、クリックしてファイルを選択")
                        .size(13.0)
                        .color(Colors::TEXT_SECONDARY));
                });
            });

        if drop_zone.response.interact(egui::Sense::click()).clicked() {
            if let Some(files) = rfd::FileDialog::new().add_filter("PDF files", &["pdf"]).pick_files() {
                self.add_uploads(files);
            }
        }

        if !self.read_errors.is_empty() {
            ui.label(RichText::new(format!("読み込みエラー: {} 件", self.read_errors.len())).color(Colors::ERROR));
            for (name, err) in self.read_errors.iter().take(SAMPLE_ERRORS) {
                ui.label(RichText::new(format!("{}: {}", name, err)).size(13.0).color(Colors::ERROR));
            }
        }

        if self.uploads.is_empty() {
            return;
        }

        let names: Vec<&str> = self.uploads.iter().map(|u| u.name.as_str()).collect();
        let plan = RenamePlan::build(&names, &self.rule());
        let summary = plan.summary();

        ui.push_id("upload_preview", |ui| preview_table(ui, &plan, 200.0));
        ui.label(format!("アップロード: {} — スキップ: {}", plan.len(), summary.skipped));

        ui.horizontal(|ui| {
            if ui.button("💾 ZIPを保存").clicked() {
                self.save_zip(&plan);
            }
            if ui.button("クリア").clicked() {
                self.uploads.clear();
                self.read_errors.clear();
            }
        });
    }
}

impl eframe::App for RenamerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ドロップされたファイルを処理
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        if !dropped.is_empty() {
            self.add_uploads(dropped);
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 10.0);

            ui.heading(RichText::new("PDF一括リネーム").size(28.0).color(Colors::TEXT_PRIMARY));
            ui.label(RichText::new("区切り文字の前/後、または数字だけをファイル名にします")
                .size(14.0)
                .color(Colors::TEXT_SECONDARY));

            if let Some(error) = &self.error {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(20.0).color(Colors::ERROR));
                    ui.label(RichText::new(error).color(Colors::ERROR));
                });
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.group(|ui| self.rule_settings(ui));
                    ui.separator();
                    self.local_section(ui);
                    self.report_section(ui);
                    ui.separator();
                    self.upload_section(ui);
                });

            // ステータスバー
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::Frame::new()
                    .fill(Colors::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(20, 10))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.status).size(13.0).color(Colors::TEXT_SECONDARY));
                    });
            });
        });
    }
}

/// 旧名 → 新名のプレビュー表
fn preview_table(ui: &mut egui::Ui, plan: &RenamePlan, height: f32) {
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(height)
        .column(Column::initial(320.0).resizable(true))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("元の名前");
            });
            header.col(|ui| {
                ui.strong("新しい名前 (プレビュー)");
            });
        })
        .body(|mut body| {
            for row in &plan.rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.original);
                    });
                    table_row.col(|ui| match &row.resolved {
                        Some(new) => {
                            ui.label(RichText::new(new).color(Colors::TEXT_PRIMARY));
                        }
                        None => {
                            ui.label(RichText::new("(スキップ)").color(Colors::WARNING));
                        }
                    });
                });
            }
        });
}

fn summary_text(summary: &Summary) -> String {
    format!(
        "完了: {} 件処理, {} 件スキップ, {} 件エラー",
        summary.processed, summary.skipped, summary.errored
    )
}

/// アプリケーションを起動
pub fn run(settings: Settings) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 760.0])
            .with_min_inner_size([640.0, 560.0])
            .with_title("PDF一括リネーム")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "PDF一括リネーム",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_style(dark_theme());
            cc.egui_ctx.set_fonts(japanese_fonts());
            Ok(Box::new(RenamerApp::new(settings)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("アプリケーションエラー: {}", e))
}
