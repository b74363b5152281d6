use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Align2, Button, Color32, Frame, ScrollArea, TextEdit, Ui};
use tracing::{error, info};

use super::theme;
use crate::ai::{EntityTagger, SummaryModel};
use crate::core::models::{Notice, NoticeKind, SummaryLength};
use crate::errors::SummarizerError;
use crate::features::summarize::summarize_text;
use crate::highlight::HighlightedSummary;
use crate::prompt::SummaryStyle;
use crate::session::{SaveTarget, Session};

pub const WINDOW_TITLE: &str = "AI-Powered Newsletter Summarizer";

type GenerationResult = Result<HighlightedSummary, SummarizerError>;

/// Path prompt standing in for a native save dialog.
struct SavePrompt {
    target: SaveTarget,
    path: String,
}

enum Action {
    Generate,
    PromptSave(SaveTarget),
    Share,
    Reset,
}

pub struct SummarizerApp {
    session: Session,
    model: Arc<dyn SummaryModel>,
    tagger: Arc<dyn EntityTagger>,
    pending: Option<Receiver<GenerationResult>>,
    notice: Option<Notice>,
    save_prompt: Option<SavePrompt>,
}

impl SummarizerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        model: Arc<dyn SummaryModel>,
        tagger: Arc<dyn EntityTagger>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            session: Session::new(),
            model,
            tagger,
            pending: None,
            notice: None,
            save_prompt: None,
        }
    }

    fn start_generation(&mut self, ctx: &egui::Context) {
        let text = match self.session.begin_generation() {
            Ok(text) => text,
            Err(notice) => {
                self.notice = Some(notice);
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        let model = Arc::clone(&self.model);
        let tagger = Arc::clone(&self.tagger);
        let style = self.session.style;
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(summarize_text(
                    model.as_ref(),
                    tagger.as_ref(),
                    &text,
                    style.as_str(),
                )),
                Err(e) => Err(SummarizerError::Io(e)),
            };
            if tx.send(result).is_err() {
                error!("Summary finished after the window closed");
            }
            ctx.request_repaint();
        });

        self.pending = Some(rx);
    }

    fn poll_generation(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(SummarizerError::ModelError(
                "summary worker stopped unexpectedly".to_string(),
            )),
        };
        self.pending = None;
        if let Some(notice) = self.session.finish_generation(result) {
            self.notice = Some(notice);
        }
    }

    fn handle(&mut self, action: Action, ctx: &egui::Context) {
        match action {
            Action::Generate => self.start_generation(ctx),
            Action::PromptSave(target) => match self.session.prepare_save(target) {
                Ok(path) => self.save_prompt = Some(SavePrompt { target, path }),
                Err(notice) => self.notice = Some(notice),
            },
            Action::Share => self.notice = Some(self.session.share()),
            Action::Reset => {
                info!("Resetting all fields");
                self.session.reset();
            }
        }
    }

    fn colored_button(ui: &mut Ui, text: &str, fill: Color32, enabled: bool) -> bool {
        ui.add_enabled(enabled, Button::new(theme::button_text(text)).fill(fill))
            .clicked()
    }

    fn form(&mut self, ui: &mut Ui) -> Option<Action> {
        let mut action = None;
        let busy = self.session.is_generating();

        ui.vertical_centered(|ui| ui.label(theme::heading(WINDOW_TITLE)));
        ui.add_space(10.0);

        ui.label(theme::label("Enter the newsletter text below:"));
        ui.add(
            TextEdit::multiline(&mut self.session.input)
                .desired_rows(10)
                .desired_width(f32::INFINITY)
                .text_color(theme::TEXT),
        );

        ui.label(theme::label("Select summary length:"));
        for length in SummaryLength::ALL {
            ui.radio_value(&mut self.session.length, length, length.label());
        }

        ui.label(theme::label("Select summary style:"));
        for style in SummaryStyle::ALL {
            ui.radio_value(&mut self.session.style, style, style.label());
        }

        ui.vertical_centered(|ui| {
            if Self::colored_button(ui, "Generate Summary", theme::BLUE, !busy) {
                action = Some(Action::Generate);
            }
            if busy {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(theme::label(&self.session.status));
                });
            } else {
                ui.label(theme::label(&self.session.status));
            }
        });

        ui.label(theme::label("Generated Summary:"));
        let entities = self.session.entities().clone();
        let mut layouter = |ui: &Ui, text: &str, wrap_width: f32| {
            let mut job = theme::highlighted_job(text, &entities);
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };
        Frame::none().fill(theme::OUTPUT_FILL).show(ui, |ui| {
            ui.add(
                TextEdit::multiline(&mut self.session.output)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY)
                    .frame(false)
                    .layouter(&mut layouter),
            );
        });

        ui.vertical_centered(|ui| {
            if Self::colored_button(ui, "Save Summary", theme::GREEN, true) {
                action = Some(Action::PromptSave(SaveTarget::SummaryText));
            }
            if Self::colored_button(ui, "Export Summary", theme::BLUE, true) {
                action = Some(Action::PromptSave(SaveTarget::SummaryDocx));
            }
            if Self::colored_button(ui, "Share Summary", theme::ORANGE, true) {
                action = Some(Action::Share);
            }
        });

        ui.label(theme::label("Provide your feedback:"));
        ui.add(
            TextEdit::multiline(&mut self.session.feedback)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .text_color(theme::TEXT),
        );

        ui.vertical_centered(|ui| {
            if Self::colored_button(ui, "Submit Feedback", theme::PURPLE, true) {
                action = Some(Action::PromptSave(SaveTarget::Feedback));
            }
            if Self::colored_button(ui, "Reset", theme::RED, !busy) {
                action = Some(Action::Reset);
            }
        });

        action
    }

    fn show_save_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = &mut self.save_prompt else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Save As")
            .id(egui::Id::new("save_prompt"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("File name (.{}):", prompt.target.extension()));
                let field = ui.text_edit_singleline(&mut prompt.path);
                if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed && !prompt.path.trim().is_empty() {
            let target = prompt.target;
            let path = PathBuf::from(prompt.path.trim());
            self.save_prompt = None;
            self.notice = Some(self.session.save(target, &path));
        } else if cancelled {
            self.save_prompt = None;
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };

        let color = match notice.kind {
            NoticeKind::Info => theme::LABEL,
            NoticeKind::Warning => theme::ORANGE,
            NoticeKind::Error => theme::RED,
        };
        let mut dismissed = false;
        egui::Window::new(notice.title.as_str())
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, notice.message.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for SummarizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_generation();

        let action = egui::CentralPanel::default()
            .frame(Frame::default().fill(theme::BACKGROUND).inner_margin(20.0))
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .show(ui, |ui| self.form(ui))
                    .inner
            })
            .inner;

        if let Some(action) = action {
            self.handle(action, ctx);
        }

        self.show_save_prompt(ctx);
        self.show_notice(ctx);
    }
}

/// Opens the summarizer window and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn run(model: Arc<dyn SummaryModel>, tagger: Arc<dyn EntityTagger>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([600.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(SummarizerApp::new(cc, model, tagger)))),
    )
}
