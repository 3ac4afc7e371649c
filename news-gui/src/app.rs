use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Color32, Rounding, Stroke};
use news_core::config::{ThemeConfig, UiConfig};
use news_core::view::{Fragment, StoryThumbnail, View};
use news_core::{Action, Store};
use tokio::runtime::Runtime;

/// Installs the configured dark palette and text size. Called once at startup.
pub fn apply_theme(ctx: &egui::Context, theme: &ThemeConfig, ui: &UiConfig) {
    let text = theme.text_color32();
    let accent = theme.accent_color32();
    let border = theme.border_color32();

    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = theme.panel_color32();
    visuals.window_fill = theme.background_color32();
    visuals.extreme_bg_color = theme.input_color32();
    visuals.faint_bg_color = theme.widget_color32();
    visuals.override_text_color = Some(text);
    visuals.selection.bg_fill = theme.selection_color32();
    visuals.selection.stroke = Stroke::new(1.0, accent);

    let widgets = &mut visuals.widgets;
    for (state, fill, outline, fg) in [
        (&mut widgets.noninteractive, theme.panel_color32(), border, text),
        (&mut widgets.inactive, theme.widget_color32(), border, text),
        (&mut widgets.hovered, theme.hover_color32(), accent, text),
        (&mut widgets.active, accent, accent, Color32::WHITE),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, outline);
        state.fg_stroke = Stroke::new(1.0, fg);
        state.rounding = Rounding::same(3.0);
    }

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
        body.size = ui.font_size;
    }
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(10.0);
    ctx.set_style(style);
}

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub store: Store,
    pub theme: ThemeConfig,
    pub ui: UiConfig,
}

pub struct NewsApp {
    runtime: Arc<Runtime>,
    store: Store,
    theme: ThemeConfig,
    ui: UiConfig,
    // Actions produced by widgets during the current frame.
    pending: Vec<Action>,
}

impl NewsApp {
    pub fn new(init: AppInit) -> Self {
        Self {
            runtime: init.runtime,
            store: init.store,
            theme: init.theme,
            ui: init.ui,
            pending: Vec::new(),
        }
    }

    fn draw_filter_panel(&mut self, ctx: &egui::Context, view: &View) {
        egui::TopBottomPanel::top("filter_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Filter").strong());

                let mut text = view.filter.value.clone();
                let mut edit = egui::TextEdit::singleline(&mut text)
                    .hint_text("keyword")
                    .desired_width(240.0);
                if !view.filter.editing {
                    edit = edit.text_color(self.theme.secondary_text_color32());
                }
                let response = ui.add(edit);

                if response.clicked() || response.gained_focus() {
                    self.pending.push(view.filter.on_focus.clone());
                }
                if response.changed() {
                    self.pending.push(view.filter.on_input(text.clone()));
                }
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submitted && view.filter.editing {
                    self.pending.push(Action::StopEditingFilter);
                }

                if ui.button("Go").clicked() {
                    self.pending.push(view.filter.button.clone());
                }
            });
            ui.add_space(4.0);
        });
    }

    fn draw_story_list(&mut self, ctx: &egui::Context, view: &View) {
        egui::SidePanel::left("stories_panel")
            .resizable(true)
            .default_width(self.ui.story_list_width)
            .show(ctx, |ui| {
                if view.stories.loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Loading stories…").weak());
                    });
                    ui.separator();
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if view.stories.items.is_empty() && !view.stories.loading {
                            ui.vertical_centered(|ui| {
                                ui.add_space(40.0);
                                ui.label(egui::RichText::new("No stories").weak());
                            });
                            return;
                        }
                        for item in &view.stories.items {
                            if self.draw_thumbnail(ui, item) {
                                self.pending.push(item.on_select.clone());
                            }
                        }
                    });
            });
    }

    /// Draws one story row and reports whether it was clicked.
    fn draw_thumbnail(&self, ui: &mut egui::Ui, item: &StoryThumbnail) -> bool {
        let fill = if item.reading {
            self.theme.reading_color32()
        } else {
            self.theme.panel_color32()
        };
        let row = egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let title = ui.add(
                egui::Label::new(self.title_job(&item.title, item.unread))
                    .wrap(true)
                    .sense(egui::Sense::click()),
            );
            let author = egui::RichText::new(&item.author)
                .size(12.0)
                .color(self.theme.secondary_text_color32());
            ui.label(author);
            title.clicked()
        });
        row.inner || row.response.interact(egui::Sense::click()).clicked()
    }

    fn title_job(&self, fragments: &[Fragment], unread: bool) -> egui::text::LayoutJob {
        let mut job = egui::text::LayoutJob::default();
        let base = egui::TextFormat {
            font_id: egui::FontId::proportional(self.ui.font_size + 2.0),
            color: if unread {
                Color32::WHITE
            } else {
                self.theme.secondary_text_color32()
            },
            italics: !unread,
            ..Default::default()
        };
        for fragment in fragments {
            let format = if fragment.emphasized {
                egui::TextFormat {
                    background: self.theme.accent_color32(),
                    color: Color32::WHITE,
                    ..base.clone()
                }
            } else {
                base.clone()
            };
            job.append(&fragment.text, 0.0, format);
        }
        job
    }

    fn draw_bottom_panel(&mut self, ctx: &egui::Context, view: &View) {
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut checked = view.auto_update.checked;
                if ui.checkbox(&mut checked, "Auto update").changed() {
                    self.pending.push(view.auto_update.on_toggle.clone());
                }
                ui.separator();
                let unread = view.stories.items.iter().filter(|s| s.unread).count();
                ui.label(
                    egui::RichText::new(format!(
                        "{} stories, {} unread",
                        view.stories.items.len(),
                        unread
                    ))
                    .size(12.0),
                );
                if let Some(status) = &view.status {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(&status.error)
                            .size(12.0)
                            .color(self.theme.error_color32()),
                    );
                }
            });
        });
    }

    fn draw_detail(&self, ctx: &egui::Context, view: &View) {
        egui::CentralPanel::default().show(ctx, |ui| match &view.detail {
            Some(detail) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading(egui::RichText::new(&detail.title).size(22.0));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(detail.body).size(self.ui.font_size));
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(&detail.author)
                            .italics()
                            .color(self.theme.secondary_text_color32()),
                    );
                });
            }
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(50.0);
                    ui.label(egui::RichText::new("Select a story to read it").weak());
                });
            }
        });
    }
}

impl Drop for NewsApp {
    fn drop(&mut self) {
        let _ = self.runtime.block_on(self.store.shutdown());
    }
}

impl eframe::App for NewsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.store.pump();

        let view = self.store.view();
        self.draw_filter_panel(ctx, &view);
        self.draw_bottom_panel(ctx, &view);
        self.draw_story_list(ctx, &view);
        self.draw_detail(ctx, &view);

        for action in std::mem::take(&mut self.pending) {
            self.store.dispatch(action);
        }

        // Effects and timers report back through the store's channel.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
