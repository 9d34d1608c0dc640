use crate::answer_validator::{FeedbackStatus, ScoreSummary};
use crate::database::Database;
use crate::generator::BatchMode;
use crate::operations::{Operation, ProblemId};
use crate::random_source::RandomSource;
use crate::session::PracticeSession;
use eframe::egui;
use log::warn;
use std::sync::Arc;

pub struct MathDrillApp<R: RandomSource> {
    db: Arc<Database>,
    session: PracticeSession<R>,
}

impl<R: RandomSource> MathDrillApp<R> {
    pub fn new(db: Arc<Database>, session: PracticeSession<R>) -> Self {
        Self { db, session }
    }

    pub fn session(&self) -> &PracticeSession<R> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PracticeSession<R> {
        &mut self.session
    }

    /// Scores the batch. Bound to both the Score button and Enter in any answer field.
    pub fn submit(&mut self) {
        if let Err(e) = self.session.submit_answers() {
            self.session.set_notice(format!("Nothing to score: {}", e));
        }
    }

    /// Appends the current session to the store; failures only produce a notice
    pub fn save_session(&mut self) {
        let record = self.session.record();
        match self.db.save_session(&record) {
            Ok(_) => self.session.set_notice("✅ Session saved successfully!"),
            Err(e) => {
                warn!("Saving session failed: {}", e);
                self.session
                    .set_notice(format!("❌ Error saving session: {}", e));
            }
        }
    }

    fn operation_label(operation: Operation) -> &'static str {
        match operation {
            Operation::Addition => "➕ Addition",
            Operation::Subtraction => "➖ Subtraction",
            Operation::Multiplication => "✖ Multiplication",
            Operation::Division => "➗ Division",
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for operation in Operation::ALL {
                let selected = self.session.selected_operation() == operation;
                if ui
                    .selectable_label(selected, Self::operation_label(operation))
                    .clicked()
                {
                    self.session.select_operation(operation);
                }
            }
        });
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button("Generate 5 Problems").clicked() {
                self.session.generate_selected();
            }
            if ui.button("Generate All Types (5 each)").clicked() {
                self.session.generate(BatchMode::AllTypes);
            }
            if ui.button("Generate Random Mix").clicked() {
                self.session.generate(BatchMode::AllTypesRandom);
            }
        });
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.session.banner() else {
            return;
        };
        let (id, message) = (banner.id, banner.message());

        let mut close = false;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).size(18.0).strong());
                close = ui.small_button("✕").clicked();
            });
        });
        if close {
            self.session.dismiss_banner(id);
        }
    }

    fn show_problems(&mut self, ui: &mut egui::Ui) {
        let mut edits: Vec<(ProblemId, String)> = Vec::new();
        let mut submit = false;

        egui::Grid::new("problems")
            .striped(true)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for (index, problem) in self.session.problems().iter().enumerate() {
                    ui.label(format!("#{}", index + 1));
                    ui.label(problem.operation.display_name());
                    ui.label(egui::RichText::new(problem.prompt()).size(20.0).strong());

                    let mut text = self.session.answer(&problem.id).unwrap_or("").to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut text)
                            .hint_text("?")
                            .desired_width(80.0),
                    );
                    if response.changed() {
                        edits.push((problem.id.clone(), text));
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }

                    match self.session.feedback(&problem.id) {
                        Some(feedback) => {
                            let color = match feedback.status {
                                FeedbackStatus::Correct => egui::Color32::GREEN,
                                FeedbackStatus::Incorrect => egui::Color32::RED,
                            };
                            ui.label(egui::RichText::new(&feedback.message).color(color));
                        }
                        None => {
                            ui.label("");
                        }
                    }
                    ui.end_row();
                }
            });

        for (id, raw) in edits {
            self.session.set_answer(&id, raw);
        }
        if submit {
            self.submit();
        }
    }

    fn show_score_card(ui: &mut egui::Ui, summary: &ScoreSummary) {
        ui.heading("📊 Score Card");
        ui.horizontal(|ui| {
            ui.label(format!("Total Problems: {}", summary.total));
            ui.label(
                egui::RichText::new(format!("Correct: {}", summary.correct))
                    .color(egui::Color32::GREEN),
            );
            ui.label(
                egui::RichText::new(format!("Incorrect: {}", summary.incorrect))
                    .color(egui::Color32::RED),
            );
            ui.label(format!("Score: {}%", summary.percentage));
        });

        if !summary.breakdown.is_empty() {
            ui.add_space(6.0);
            ui.label(egui::RichText::new("Breakdown by Operation").strong());
            for (operation, tally) in &summary.breakdown {
                ui.label(format!(
                    "{}: {}/{}  {}%",
                    operation.display_name(),
                    tally.correct,
                    tally.total,
                    tally.percentage()
                ));
            }
        }
    }
}

impl<R: RandomSource> eframe::App for MathDrillApp<R> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.tick();
        if let Some(wait) = self.session.time_until_banner_dismissal() {
            ctx.request_repaint_after(wait);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("🔢 Math Problems Generator");
                ui.add_space(10.0);

                self.show_controls(ui);
                ui.add_space(10.0);
                self.show_banner(ui);

                if self.session.problems().is_empty() {
                    return;
                }

                ui.add_space(10.0);
                self.show_problems(ui);
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("💾 Save Session").clicked() {
                        self.save_session();
                    }
                    if ui.button("Score").clicked() {
                        self.submit();
                    }
                });

                if let Some(notice) = self.session.notice() {
                    ui.label(notice);
                }

                if let Some(summary) = self.session.summary() {
                    ui.add_space(10.0);
                    Self::show_score_card(ui, summary);
                }
            });
        });
    }
}

pub fn run_app<R: RandomSource + 'static>(
    db: Arc<Database>,
    session: PracticeSession<R>,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Math Drill",
        options,
        Box::new(|_cc| Ok(Box::new(MathDrillApp::new(db, session)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_provider::SystemDateProvider;
    use crate::random_source::RngSource;
    use rand::rngs::StdRng;

    fn app() -> MathDrillApp<RngSource<StdRng>> {
        let db = Arc::new(Database::new(":memory:").unwrap());
        let session = PracticeSession::new(RngSource::seeded(3), Arc::new(SystemDateProvider));
        MathDrillApp::new(db, session)
    }

    #[test]
    fn test_submit_without_problems_sets_notice() {
        let mut app = app();
        app.submit();
        assert!(app.session().notice().unwrap().contains("Nothing to score"));
        assert!(app.session().summary().is_none());
    }

    #[test]
    fn test_save_session_appends_to_store() {
        let mut app = app();
        app.session_mut().generate(BatchMode::AllTypes);
        app.submit();
        app.save_session();
        app.save_session();

        assert_eq!(app.db.count_sessions().unwrap(), 2);
        assert_eq!(app.session().notice(), Some("✅ Session saved successfully!"));
    }

    #[test]
    fn test_failed_save_keeps_session_state() {
        let mut app = app();
        app.session_mut().generate(BatchMode::Single(Operation::Addition));
        app.submit();
        let summary_before = app.session().summary().cloned();

        app.db.put_value(crate::database::SESSIONS_KEY, "{broken").unwrap();
        app.save_session();

        assert!(app.session().notice().unwrap().starts_with("❌ Error saving session"));
        assert_eq!(app.session().summary().cloned(), summary_before);
        assert_eq!(app.session().problems().len(), 5);
    }
}
