use eframe::egui::{self, RichText};
use std::time::Instant;
use tracing::info;

use crate::catalog::Category;
use crate::config::Settings;
use crate::entries::EntrySource;
use crate::pager::view::{self, PagerAction};
use crate::pager::{CardPager, PagerMode, PagerOptions};
use crate::theme::Theme;

const WINDOW_TITLE: &str = "Fact Cards";
const CATEGORY_COLUMNS: usize = 2;

/// The single page slot. Only one page exists at a time.
enum Page {
    Home,
    Pager(Box<CardPager>),
}

enum ShellAction {
    Open(Category),
    Pager(PagerAction),
}

/// Owns the current page and swaps it on navigation, tearing the old pager
/// down before it is replaced.
struct Shell {
    page: Page,
    source: EntrySource,
    settings: Settings,
    theme: Theme,
}

impl Shell {
    fn new(settings: Settings) -> Self {
        let source = EntrySource::new(&settings.data_dir, settings.extension.as_str());
        let theme = Theme::from_name(&settings.theme);
        Self {
            page: Page::Home,
            source,
            settings,
            theme,
        }
    }

    fn pager(&self) -> Option<&CardPager> {
        match &self.page {
            Page::Pager(pager) => Some(&**pager),
            Page::Home => None,
        }
    }

    /// Put `page` in the slot and hand back the previous one, already torn down.
    fn replace(&mut self, page: Page) -> Page {
        if let Page::Pager(pager) = &mut self.page {
            pager.teardown();
        }
        std::mem::replace(&mut self.page, page)
    }

    fn open(&mut self, category: &str, mode: PagerMode, now: Instant) {
        info!(category, ?mode, "opening pager");
        let entries = self.source.load(category);
        let options =
            PagerOptions::for_mode(mode, self.settings.auto_interval, self.theme.fit_bounds());
        let pager = CardPager::new(category, entries, options, now);
        self.replace(Page::Pager(Box::new(pager)));
    }

    fn go_home(&mut self) {
        info!("returning home");
        self.replace(Page::Home);
    }

    fn switch_mode(&mut self, now: Instant) {
        let Some((category, mode)) = self
            .pager()
            .map(|p| (p.category().to_string(), p.mode().other()))
        else {
            return;
        };
        self.open(&category, mode, now);
    }

    fn apply(&mut self, action: ShellAction, now: Instant) {
        match action {
            ShellAction::Open(category) => self.open(category.name(), self.settings.mode, now),
            ShellAction::Pager(PagerAction::GoHome) => self.go_home(),
            ShellAction::Pager(PagerAction::SwitchMode) => self.switch_mode(now),
        }
    }
}

struct FactDeckApp {
    shell: Shell,
}

impl FactDeckApp {
    fn new(settings: Settings) -> Self {
        Self {
            shell: Shell::new(settings),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.shell.theme = self.shell.theme.toggled();
        apply_visuals(ctx, &self.shell.theme);
        info!(theme = %self.shell.theme.name, "theme changed");
    }
}

fn apply_visuals(ctx: &egui::Context, theme: &Theme) {
    if theme.name == "dark" {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

impl eframe::App for FactDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Viewport commands must be sent outside ctx.input() (RwLock)
        let (quit, toggle_theme) =
            ctx.input(|i| (i.key_pressed(egui::Key::Q), i.key_pressed(egui::Key::D)));
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if toggle_theme {
            self.toggle_theme(ctx);
        }

        let theme = &self.shell.theme;
        let action = match &mut self.shell.page {
            Page::Home => draw_home(ctx, theme, self.shell.settings.mode).map(ShellAction::Open),
            Page::Pager(pager) => view::show(ctx, pager, theme).map(ShellAction::Pager),
        };

        if let Some(action) = action {
            self.shell.apply(action, Instant::now());
            ctx.request_repaint();
        }
    }
}

fn draw_home(ctx: &egui::Context, theme: &Theme, mode: PagerMode) -> Option<Category> {
    let mut chosen = None;

    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme.background).inner_margin(24.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Choose a Category")
                        .size(theme.title_size)
                        .color(theme.foreground)
                        .strong(),
                );
                ui.add_space(4.0);
                let hint = format!("Cards open in {} mode", mode.name());
                ui.label(RichText::new(hint).color(theme.muted));
                ui.add_space(16.0);

                egui::Grid::new("categories")
                    .num_columns(CATEGORY_COLUMNS)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        for (i, category) in Category::ALL.iter().enumerate() {
                            let button = egui::Button::new(
                                RichText::new(category.name()).color(theme.foreground),
                            );
                            if ui.add_sized([180.0, 32.0], button).clicked() {
                                chosen = Some(*category);
                            }
                            if i % CATEGORY_COLUMNS == CATEGORY_COLUMNS - 1 {
                                ui.end_row();
                            }
                        }
                    });
            });
        });

    chosen
}

pub fn run(settings: Settings, start: Option<Category>) -> anyhow::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([640.0, 480.0])
        .with_min_inner_size([320.0, 260.0])
        .with_title(WINDOW_TITLE);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let mut app = FactDeckApp::new(settings);
            apply_visuals(&cc.egui_ctx, &app.shell.theme);
            if let Some(category) = start {
                let mode = app.shell.settings.mode;
                app.shell.open(category.name(), mode, Instant::now());
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
