//! テーマ設定 - ダークテーマと日本語フォント

use egui::{Color32, CornerRadius, FontData, FontDefinitions, FontFamily, Stroke, Style, Visuals};

/// カラーパレット
pub struct Colors;

impl Colors {
    pub const BG_DARK: Color32 = Color32::from_rgb(10, 15, 26);
    pub const BG_CARD: Color32 = Color32::from_rgb(18, 26, 45);
    pub const BG_HOVER: Color32 = Color32::from_rgb(26, 37, 64);
    pub const ACCENT: Color32 = Color32::from_rgb(255, 107, 91);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(139, 157, 195);
    pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);
    pub const WARNING: Color32 = Color32::from_rgb(250, 204, 21);
    pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
    pub const BORDER: Color32 = Color32::from_rgb(42, 58, 92);
}

/// 日本語フォントの候補
const FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
];

/// ダークテーマのスタイルを作成
pub fn dark_theme() -> Style {
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Colors::BG_DARK;
    visuals.window_fill = Colors::BG_CARD;
    visuals.extreme_bg_color = Colors::BG_DARK;
    visuals.faint_bg_color = Colors::BG_CARD;

    let radius = CornerRadius::same(8);
    for (widget, fill, text) in [
        (&mut visuals.widgets.noninteractive, Colors::BG_CARD, Colors::TEXT_SECONDARY),
        (&mut visuals.widgets.inactive, Colors::BG_CARD, Colors::TEXT_PRIMARY),
        (&mut visuals.widgets.hovered, Colors::BG_HOVER, Colors::TEXT_PRIMARY),
        (&mut visuals.widgets.active, Colors::ACCENT, Colors::TEXT_PRIMARY),
    ] {
        widget.bg_fill = fill;
        widget.fg_stroke = Stroke::new(1.0, text);
        widget.corner_radius = radius;
    }

    visuals.selection.bg_fill = Colors::ACCENT.gamma_multiply(0.5);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ACCENT);

    Style { visuals, ..Style::default() }
}

/// 最初に見つかった日本語フォントを追加
pub fn japanese_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let Some(font_data) = FONT_CANDIDATES.iter().find_map(|path| std::fs::read(path).ok()) else {
        tracing::warn!("日本語フォントが見つかりません");
        return fonts;
    };

    fonts
        .font_data
        .insert("jp".to_owned(), FontData::from_owned(font_data).into());
    fonts
        .families
        .entry(FontFamily::Proportional)
        .or_default()
        .insert(0, "jp".to_owned());
    fonts
        .families
        .entry(FontFamily::Monospace)
        .or_default()
        .push("jp".to_owned());

    fonts
}
