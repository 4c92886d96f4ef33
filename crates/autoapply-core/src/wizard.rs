//! The multi-page wizard state machine.
//!
//! ```text
//! Idle -> Opening -> AnsweringPage <-> Advancing
//!                        |
//!                        v
//!                    Reviewing -> Submitting -> Completed
//! ```
//!
//! `Failed` can be entered from any state. A run checks for cancellation
//! at the top of every page cycle and before every question.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use autoapply_config::WizardConfig;
use autoapply_protocols::{
    Affordance, AffordanceState, Confirmation, ContainerSnapshot, FormPage, Notification, PageError, RunError,
    RunId, Widget,
};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::actuate::WidgetActuator;
use crate::answer::{AnswerComputer, QuestionContext};
use crate::extract::extract;
use crate::pacing::Pacer;
use crate::profile::{ProfileAccessor, YearMonth};
use crate::resolve::KeywordResolver;

#[cfg(test)]
#[path = "wizard_tests.rs"]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardPhase {
    Idle,
    Opening,
    AnsweringPage,
    Advancing,
    Reviewing,
    Submitting,
    Completed,
    Failed,
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardPhase::Idle => "idle",
            WizardPhase::Opening => "opening",
            WizardPhase::AnsweringPage => "answering_page",
            WizardPhase::Advancing => "advancing",
            WizardPhase::Reviewing => "reviewing",
            WizardPhase::Submitting => "submitting",
            WizardPhase::Completed => "completed",
            WizardPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Per-page loop counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub current_attempt: u32,
    pub last_observed_question_count: Option<usize>,
    pub empty_cycles: u32,
}

impl WizardState {
    /// Reset after moving to a new page.
    fn next_page(&mut self) {
        *self = Self::default();
    }
}

/// Live view of a run, shared with status queries.
#[derive(Debug)]
pub struct RunProgress {
    current_page: AtomicU32,
    phase: Mutex<WizardPhase>,
}

impl Default for RunProgress {
    fn default() -> Self {
        Self {
            current_page: AtomicU32::new(0),
            phase: Mutex::new(WizardPhase::Idle),
        }
    }
}

impl RunProgress {
    pub fn phase(&self) -> WizardPhase {
        *self.phase.lock()
    }

    /// 1-based page number of the active run, 0 before the form opens.
    pub fn current_page(&self) -> u32 {
        self.current_page.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.current_page.store(0, Ordering::SeqCst);
        *self.phase.lock() = WizardPhase::Idle;
    }

    fn set_phase(&self, phase: WizardPhase) {
        *self.phase.lock() = phase;
    }

    fn set_page(&self, page: u32) {
        self.current_page.store(page, Ordering::SeqCst);
    }
}

/// Terminal state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(Confirmation),
    Failed(RunError),
}

/// What a run did, for notification and diagnostics.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Every phase entered, in order, without consecutive repeats.
    pub phases: Vec<WizardPhase>,
    pub answered: u32,
    pub skipped: u32,
    /// Pages advanced past with the continue affordance.
    pub pages: u32,
    pub loop_detected: bool,
}

impl RunReport {
    /// Whether the run reports `success: true`.
    pub fn success(&self) -> bool {
        matches!(&self.outcome, RunOutcome::Completed(c) if c.is_success())
    }

    pub fn notification(&self, run_id: RunId) -> Notification {
        match &self.outcome {
            RunOutcome::Completed(confirmation) => Notification::completed(run_id, *confirmation),
            RunOutcome::Failed(e) => Notification::failed(run_id, e.to_string()),
        }
    }
}

/// Mutable bookkeeping for one run.
struct Run<'a> {
    page: &'a dyn FormPage,
    cancel: &'a CancellationToken,
    progress: &'a RunProgress,
    now: YearMonth,
    phases: Vec<WizardPhase>,
    answered: u32,
    skipped: u32,
    pages: u32,
    loop_detected: bool,
}

impl<'a> Run<'a> {
    fn new(page: &'a dyn FormPage, cancel: &'a CancellationToken, progress: &'a RunProgress) -> Self {
        Self {
            page,
            cancel,
            progress,
            now: YearMonth::now(),
            phases: Vec::new(),
            answered: 0,
            skipped: 0,
            pages: 0,
            loop_detected: false,
        }
    }

    fn enter(&mut self, phase: WizardPhase) {
        if self.phases.last() != Some(&phase) {
            debug!(%phase, "wizard phase");
            self.phases.push(phase);
        }
        self.progress.set_phase(phase);
    }

    fn checkpoint(&self) -> Result<(), RunError> {
        if self.cancel.is_cancelled() {
            Err(RunError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn into_report(self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            phases: self.phases,
            answered: self.answered,
            skipped: self.skipped,
            pages: self.pages,
            loop_detected: self.loop_detected,
        }
    }
}

/// Drives one page context through the application wizard.
pub struct WizardDriver {
    resolver: Arc<KeywordResolver>,
    profile: Arc<ProfileAccessor>,
    actuator: WidgetActuator,
    pacer: Pacer,
    config: WizardConfig,
}

impl WizardDriver {
    pub fn new(
        resolver: Arc<KeywordResolver>,
        profile: Arc<ProfileAccessor>,
        actuator: WidgetActuator,
        pacer: Pacer,
        config: WizardConfig,
    ) -> Self {
        Self {
            resolver,
            profile,
            actuator,
            pacer,
            config,
        }
    }

    /// Run the wizard to a terminal state. Never panics on page failures;
    /// they end the run as [`RunOutcome::Failed`].
    pub async fn run(&self, page: &dyn FormPage, cancel: &CancellationToken, progress: &RunProgress) -> RunReport {
        let mut run = Run::new(page, cancel, progress);
        let outcome = match self.drive(&mut run).await {
            Ok(confirmation) => {
                run.enter(WizardPhase::Completed);
                info!(%confirmation, answered = run.answered, skipped = run.skipped, "run completed");
                RunOutcome::Completed(confirmation)
            }
            Err(RunError::Cancelled) => {
                run.enter(WizardPhase::Completed);
                info!("run stopped");
                RunOutcome::Completed(Confirmation::Stopped)
            }
            Err(e) => {
                run.enter(WizardPhase::Failed);
                error!(error = %e, "run failed");
                RunOutcome::Failed(e)
            }
        };
        run.into_report(outcome)
    }

    async fn drive(&self, run: &mut Run<'_>) -> Result<Confirmation, RunError> {
        let page = run.page;

        run.enter(WizardPhase::Opening);
        let entry = page
            .find_affordance(Affordance::Entry)
            .await?
            .ok_or(RunError::EntryPointMissing)?;
        page.activate(&entry.element).await?;
        self.pacer.entry_open().await;
        run.progress.set_page(1);

        run.enter(WizardPhase::AnsweringPage);
        let mut state = WizardState::default();
        loop {
            run.checkpoint()?;

            if page.success_indicator_present().await? {
                info!("success indicator present");
                return Ok(Confirmation::Confirmed);
            }

            let containers = page.question_containers().await?;
            let count = containers.len();
            debug!(count, attempt = state.current_attempt, "question containers");
            self.answer_all(run, &containers).await?;

            if let Some(next) = enabled(page, Affordance::Continue).await? {
                run.enter(WizardPhase::Advancing);
                page.activate(&next.element).await?;
                self.pacer.page_transition().await;
                run.pages += 1;
                run.progress.set_page(run.pages + 1);
                state.next_page();
                run.enter(WizardPhase::AnsweringPage);
                continue;
            }

            if enabled(page, Affordance::Review).await?.is_some()
                || enabled(page, Affordance::Submit).await?.is_some()
            {
                break;
            }

            if count == 0 {
                state.empty_cycles += 1;
                if state.empty_cycles >= self.config.empty_cycle_limit {
                    info!(cycles = state.empty_cycles, "no questions rendered, treating form as drained");
                    return Ok(Confirmation::FormDrained);
                }
            } else {
                state.empty_cycles = 0;
                if state.last_observed_question_count == Some(count) {
                    warn!(count, "question count unchanged, leaving page");
                    run.loop_detected = true;
                    break;
                }
            }

            state.last_observed_question_count = Some(count);
            state.current_attempt += 1;
            if state.current_attempt >= self.config.max_attempts {
                warn!(attempts = state.current_attempt, "retry ceiling reached, leaving page");
                break;
            }
            self.pacer.page_transition().await;
        }

        run.enter(WizardPhase::Reviewing);
        if let Some(review) = enabled(page, Affordance::Review).await? {
            page.activate(&review.element).await?;
            self.pacer.page_transition().await;
        }

        run.checkpoint()?;
        run.enter(WizardPhase::Submitting);
        let Some(submit) = enabled(page, Affordance::Submit).await? else {
            warn!("submit affordance not found");
            return Ok(Confirmation::SubmitNotReached);
        };

        let containers = page.question_containers().await?;
        self.answer_all(run, &containers).await?;
        run.checkpoint()?;

        page.activate(&submit.element).await?;
        self.pacer.submit_wait().await;

        if page.success_indicator_present().await? {
            if let Some(dismiss) = page.find_affordance(Affordance::Dismiss).await? {
                if let Err(e) = page.activate(&dismiss.element).await {
                    debug!(error = %e, "dismiss failed");
                }
            }
            Ok(Confirmation::Confirmed)
        } else {
            warn!("no success indicator after submit, completing unconfirmed");
            Ok(Confirmation::Unconfirmed)
        }
    }

    async fn answer_all(&self, run: &mut Run<'_>, containers: &[ContainerSnapshot]) -> Result<(), RunError> {
        let computer = AnswerComputer::new(&self.profile, run.now);
        for container in containers {
            run.checkpoint()?;
            match self.answer_one(run.page, &computer, container).await {
                Ok(true) => run.answered += 1,
                Ok(false) => run.skipped += 1,
                Err(e) if e.is_element_scoped() => {
                    debug!(element = %container.element, error = %e, "skipping question");
                    run.skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn answer_one(
        &self,
        page: &dyn FormPage,
        computer: &AnswerComputer<'_>,
        container: &ContainerSnapshot,
    ) -> Result<bool, PageError> {
        let Some(widget) = container.widget.as_ref() else {
            debug!(element = %container.element, "container has no widget");
            return Ok(false);
        };
        let Some(text) = extract(container) else {
            debug!(element = %container.element, "container has no question text");
            return Ok(false);
        };

        let ctx = QuestionContext::new(text.as_str(), widget, container.hint.as_deref());
        let path = self.resolver.resolve(&text);
        let Some(answer) = computer.compute(path.as_ref(), &ctx) else {
            info!(question = %text, ?path, "no answer, skipping question");
            return Ok(false);
        };
        debug!(
            question = %text,
            ?path,
            provenance = %answer.provenance,
            answer = %answer.value,
            "answering"
        );

        let applied = self.actuator.apply(page, widget, &answer.value, ctx.numeric).await?;
        if !applied && self.actuator.dropdown_fallback() && matches!(widget, Widget::Dropdown { .. }) {
            return self.actuator.apply_fallback(page, widget).await;
        }
        Ok(applied)
    }
}

async fn enabled(page: &dyn FormPage, affordance: Affordance) -> Result<Option<AffordanceState>, PageError> {
    Ok(page.find_affordance(affordance).await?.filter(|a| a.enabled))
}
