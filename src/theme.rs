use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_window: Color32,
    pub surface_panel: Color32,
    pub surface_card: Color32,
    pub surface_input: Color32,
    pub accent: Color32,
    pub accent_strong: Color32,
    pub accent_hover: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub spacing_24: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub radius_pill: u8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_window: Color32::from_rgb(0x11, 0x18, 0x27),
            surface_panel: Color32::from_rgb(0x1F, 0x29, 0x37),
            surface_card: Color32::from_rgb(0x37, 0x41, 0x51),
            surface_input: Color32::from_rgb(0x4B, 0x55, 0x63),
            accent: Color32::from_rgb(0x34, 0xD3, 0x99),
            accent_strong: Color32::from_rgb(0x05, 0x96, 0x69),
            accent_hover: Color32::from_rgb(0x04, 0x78, 0x57),
            danger: Color32::from_rgb(0xF8, 0x71, 0x71),
            text_primary: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            text_secondary: Color32::from_rgb(0xD1, 0xD5, 0xDB),
            text_muted: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            border_subtle: Color32::from_rgba_premultiplied(255, 255, 255, 16),
            spacing_8: 8.0,
            spacing_12: 12.0,
            spacing_16: 16.0,
            spacing_24: 24.0,
            radius_8: 8,
            radius_12: 12,
            radius_pill: 16,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.surface_window;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        visuals.widgets.noninteractive.bg_fill = self.surface_panel;
        visuals.widgets.noninteractive.weak_bg_fill = self.surface_panel;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.inactive.bg_fill = self.surface_input;
        visuals.widgets.inactive.weak_bg_fill = self.surface_input;
        visuals.widgets.inactive.fg_stroke.color = self.text_primary;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.accent_hover;
        visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.active.bg_fill = self.accent_strong;
        visuals.widgets.active.fg_stroke.color = self.text_primary;
        visuals.widgets.active.bg_stroke = Stroke::NONE;
        visuals.widgets.open.bg_fill = self.surface_card;
        visuals.widgets.open.bg_stroke = Stroke::NONE;
        visuals.selection.bg_fill = self.accent_strong;
        visuals.hyperlink_color = self.accent;
        visuals.window_fill = self.surface_panel;
        visuals.window_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.window_corner_radius = CornerRadius::same(self.radius_12);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_rgba_premultiplied(0, 0, 0, 96),
        };

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(22.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(13.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(12.0));
        ctx.set_style(style);
    }

    pub fn panel_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_panel)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_card)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    pub fn badge_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(self.spacing_8 as i8, 2))
            .corner_radius(CornerRadius::same(self.radius_pill))
    }

    pub fn chip_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_card)
            .inner_margin(Margin::symmetric(self.spacing_12 as i8, 4))
            .corner_radius(CornerRadius::same(self.radius_pill))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }
}
