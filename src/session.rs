use crate::answer_validator::{
    Answers, Feedback, FeedbackMap, ScoreSummary, ValidationError, validate,
};
use crate::banner::{Banner, BannerId, BannerSlot, BannerTier};
use crate::date_provider::DateProvider;
use crate::generator::{BatchMode, ProblemGenerator};
use crate::operations::{Operation, Problem, ProblemId};
use crate::random_source::RandomSource;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything persisted when a session is saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    pub problems: Vec<Problem>,
    pub answers: Answers,
    pub feedback: FeedbackMap,
    pub score_summary: Option<ScoreSummary>,
}

/// Command layer between the front end and the generator/validator core
pub struct PracticeSession<R: RandomSource> {
    generator: ProblemGenerator<R>,
    date_provider: Arc<dyn DateProvider>,
    selected_operation: Operation,
    problems: Vec<Problem>,
    answers: Answers,
    feedback: FeedbackMap,
    summary: Option<ScoreSummary>,
    banner: BannerSlot,
    notice: Option<String>,
}

impl<R: RandomSource> PracticeSession<R> {
    pub fn new(random: R, date_provider: Arc<dyn DateProvider>) -> Self {
        Self::with_banner_slot(random, date_provider, BannerSlot::default())
    }

    pub fn with_banner_slot(
        random: R,
        date_provider: Arc<dyn DateProvider>,
        banner: BannerSlot,
    ) -> Self {
        Self {
            generator: ProblemGenerator::new(random, date_provider.clone()),
            date_provider,
            selected_operation: Operation::default(),
            problems: Vec::new(),
            answers: Answers::new(),
            feedback: FeedbackMap::new(),
            summary: None,
            banner,
            notice: None,
        }
    }

    pub fn select_operation(&mut self, operation: Operation) {
        self.selected_operation = operation;
    }

    pub fn selected_operation(&self) -> Operation {
        self.selected_operation
    }

    /// Replaces the batch and discards everything derived from the old one
    pub fn generate(&mut self, mode: BatchMode) -> &[Problem] {
        self.problems = self.generator.generate_batch(mode);
        self.answers.clear();
        self.feedback.clear();
        self.summary = None;
        self.banner.clear();
        self.clear_notice();
        &self.problems
    }

    pub fn generate_selected(&mut self) -> &[Problem] {
        self.generate(BatchMode::Single(self.selected_operation))
    }

    /// Records raw input and invalidates that problem's feedback
    pub fn set_answer(&mut self, id: &ProblemId, raw: impl Into<String>) {
        if !self.problems.iter().any(|p| &p.id == id) {
            warn!("Ignoring answer for unknown problem {}", id);
            return;
        }
        self.answers.insert(id.clone(), raw.into());
        self.feedback.remove(id);
    }

    /// Scores the current batch and raises the banner for the result.
    /// Any notice left over from an earlier action is dropped.
    pub fn submit_answers(&mut self) -> Result<&ScoreSummary, ValidationError> {
        self.clear_notice();
        let validation = validate(&self.problems, &self.answers)?;
        let tier = BannerTier::for_summary(&validation.summary);

        info!(
            "Scored {}/{} ({}%)",
            validation.summary.correct, validation.summary.total, validation.summary.percentage
        );

        self.feedback = validation.feedback;
        self.banner.show(tier, self.date_provider.get_current_time());
        Ok(self.summary.insert(validation.summary))
    }

    pub fn dismiss_banner(&mut self, id: BannerId) -> bool {
        self.banner.dismiss(id)
    }

    /// Runs the banner's auto-dismissal against the session clock
    pub fn tick(&mut self) -> Option<BannerId> {
        self.banner.expire(self.date_provider.get_current_time())
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.current()
    }

    pub fn time_until_banner_dismissal(&self) -> Option<std::time::Duration> {
        self.banner
            .remaining(self.date_provider.get_current_time())
            .and_then(|remaining| remaining.to_std().ok())
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn answer(&self, id: &ProblemId) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    pub fn feedback(&self, id: &ProblemId) -> Option<&Feedback> {
        self.feedback.get(id)
    }

    pub fn summary(&self) -> Option<&ScoreSummary> {
        self.summary.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// One-line message for the front end, e.g. the outcome of a save
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            timestamp: self.date_provider.get_current_time(),
            problems: self.problems.clone(),
            answers: self.answers.clone(),
            feedback: self.feedback.clone(),
            score_summary: self.summary.clone(),
        }
    }
}
