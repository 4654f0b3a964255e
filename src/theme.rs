//! Centralized theme constants for Book Q&A
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6); // gray-100
pub const BG_CARD: Color32 = Color32::WHITE;
pub const BG_INPUT: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb); // gray-50
pub const BG_ANSWER: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb); // gray-50

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37); // gray-800
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x37, 0x41, 0x51); // gray-700
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80); // gray-500
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb); // gray-200

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a); // green-600
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xd9, 0x77, 0x06); // amber-600
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600

// =============================================================================
// COLORS - Buttons
// =============================================================================
// Upload (blue)
pub const BTN_UPLOAD: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb); // blue-600
// Ask (green)
pub const BTN_ASK: Color32 = Color32::from_rgb(0x16, 0xa3, 0x4a); // green-600
// Neutral
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb); // gray-200
// Disabled state
pub const BTN_DISABLED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf); // gray-400

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 26.0;
pub const FONT_HEADING: f32 = 17.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 12.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const CONTENT_MAX_WIDTH: f32 = 576.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
pub const RADIUS_DEFAULT: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 16.0;
pub const STROKE_DEFAULT: f32 = 1.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 24.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: false,
        panel_fill: BG_BASE,
        window_fill: BG_CARD,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_ANSWER,
        hyperlink_color: BTN_UPLOAD,
        override_text_color: Some(TEXT_PRIMARY),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(12),
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        ..egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(16.0, 8.0);
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(FONT_BODY),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            egui::FontId::proportional(FONT_BODY),
        );
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================

/// White rounded card with soft shadow, one per form section
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_CARD)
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(24),
        })
}

pub fn answer_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ANSWER)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_DEFAULT)
        .inner_margin(egui::Margin::same(16))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_CARD)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(20))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Neutral gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_SECONDARY))
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Solid action button. Greys out when `enabled` is false.
pub fn button_action(text: impl Into<String>, fill: Color32, enabled: bool) -> egui::Button<'static> {
    let fill = if enabled { fill } else { BTN_DISABLED };
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_ON_ACCENT).strong())
        .fill(fill)
        .corner_radius(RADIUS_DEFAULT)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
}
