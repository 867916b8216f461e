use std::time::Instant;

use eframe::egui::{self, FontId, RichText, Stroke, StrokeKind, vec2};

use super::layout::CardLayout;
use super::{CardPager, PagerKey};
use crate::fit::PainterMeasurer;
use crate::theme::Theme;

/// What the pager page asks its host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    GoHome,
    SwitchMode,
}

/// Draw the pager page and feed this frame's input into it.
pub fn show(ctx: &egui::Context, pager: &mut CardPager, theme: &Theme) -> Option<PagerAction> {
    let now = Instant::now();
    let mut action = None;

    egui::TopBottomPanel::top("pager_header")
        .frame(egui::Frame::new().fill(theme.background).inner_margin(10.0))
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("\u{2190} Back").clicked() {
                    action = Some(PagerAction::GoHome);
                }
                ui.label(
                    RichText::new(pager.category())
                        .size(theme.title_size)
                        .color(theme.foreground)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(pager.options().other_mode_label.as_str()).clicked() {
                        action = Some(PagerAction::SwitchMode);
                    }
                });
            });
        });

    let idle = !pager.is_animating();
    egui::TopBottomPanel::bottom("pager_controls")
        .frame(egui::Frame::new().fill(theme.background).inner_margin(10.0))
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.columns(3, |cols| {
                cols[0].with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    let prev = egui::Button::new("\u{25C0} Prev");
                    if ui.add_enabled(idle, prev).clicked() {
                        pager.prev(now);
                    }
                });
                cols[1].vertical_centered(|ui| {
                    ui.label(RichText::new(pager.position_label()).color(theme.muted));
                });
                cols[2].with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let next = egui::Button::new("Next \u{25B6}");
                    if ui.add_enabled(idle, next).clicked() {
                        pager.next(now);
                    }
                });
            });
        });

    let (left, right, escape) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::ArrowLeft),
            i.key_pressed(egui::Key::ArrowRight),
            i.key_pressed(egui::Key::Escape),
        )
    });
    if left {
        pager.handle_key(PagerKey::Left, now);
    }
    if right {
        pager.handle_key(PagerKey::Right, now);
    }
    if escape {
        action = Some(PagerAction::GoHome);
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme.background).inner_margin(0.0))
        .show(ctx, |ui| {
            let container = ui.max_rect();
            pager.resize(container, now);
            handle_swipe(ctx, pager, container, now);
            pager.tick(now);

            let Some(layout) = pager.layout() else {
                return;
            };
            pager.prepare(&PainterMeasurer::new(ui.painter(), layout.wrap_width()));
            paint_card(ui, pager, &layout, theme);

            // Shrunk-and-clipped facts stay readable on hover.
            let truncated = !pager.is_animating()
                && pager.visible_texts().first().is_some_and(|t| t.fitted.truncated);
            if truncated {
                if let Some(full) = pager.current_entry() {
                    ui.interact(layout.card, ui.id().with("card_hover"), egui::Sense::hover())
                        .on_hover_text(full);
                }
            }
        });

    if let Some(at) = pager.next_wakeup() {
        ctx.request_repaint_after(at.saturating_duration_since(Instant::now()));
    }

    action
}

fn handle_swipe(ctx: &egui::Context, pager: &mut CardPager, container: egui::Rect, now: Instant) {
    let (pressed, released, pointer_pos) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });
    let Some(pos) = pointer_pos else { return };

    if pressed && container.contains(pos) {
        pager.press(pos.x);
    }
    if released {
        pager.release(pos.x, now);
    }
}

fn paint_card(ui: &egui::Ui, pager: &CardPager, layout: &CardLayout, theme: &Theme) {
    let painter = ui.painter();
    painter.rect_filled(layout.card, theme.card_radius, theme.card_fill);
    painter.rect_stroke(
        layout.card,
        theme.card_radius,
        Stroke::new(1.5, theme.card_stroke),
        StrokeKind::Inside,
    );

    // Text sliding past the card edge is hidden, not drawn over the window.
    let clipped = painter.with_clip_rect(layout.card);
    for text in pager.visible_texts() {
        let galley = clipped.layout(
            text.fitted.text.clone(),
            FontId::proportional(text.fitted.font_size),
            theme.foreground,
            layout.wrap_width(),
        );
        let center = layout.text_center() + vec2(text.offset_x, 0.0);
        let pos = center - galley.rect.size() / 2.0;
        clipped.galley(pos, galley, theme.foreground);
    }

    if pager.mode() == super::PagerMode::Auto {
        let hint_color = Theme::with_opacity(theme.accent, 0.7);
        let galley = painter.layout_no_wrap(
            "auto".to_string(),
            FontId::proportional(11.0),
            hint_color,
        );
        let pos = layout.card.right_bottom() - galley.rect.size() - vec2(10.0, 8.0);
        painter.galley(pos, galley, hint_color);
    }
}
