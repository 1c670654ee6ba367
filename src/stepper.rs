//! The time-stepped morph between two slides.
//!
//! A transition is armed (pairs matched, both slides frozen), then runs for a
//! fixed number of steps on a fixed-period timer. At every step the source
//! slide fades out, the destination fades in, and both elements of each pair
//! are drawn at the same interpolated box. Completion, natural or forced,
//! cancels the timer, runs the completion callback and then unfreezes.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::MorphConfig;
use crate::dom::{Document, NodeId};
use crate::error::{MorphError, MorphResult};
use crate::freezer::{FreezeToken, LayoutFreezer};
use crate::geometry::Rect;
use crate::matcher::{CorrespondenceMatcher, CorrespondencePair};
use crate::scheduler::{Scheduler, TimerHandle, TimerKind, TimerTarget};
use crate::state::TransitionPhase;

/// Runs once when a transition ends, whether it ran to the end or was cut short.
pub type CompletionCallback = Box<dyn FnOnce(&mut Document) -> anyhow::Result<()>>;

/// Result of one step timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No transition was running
    Idle,
    /// Applied the given step; more follow
    Stepped(u32),
    /// Applied the last step and completed the transition
    Completed,
}

struct ActiveTransition {
    source: NodeId,
    dest: NodeId,
    pairs: Vec<CorrespondencePair>,
    freeze: FreezeToken,
    step_index: u32,
    timer: Option<TimerHandle>,
    on_complete: Option<CompletionCallback>,
}

pub struct TransitionStepper {
    widget: usize,
    matcher: CorrespondenceMatcher,
    step_total: u32,
    step_interval: Duration,
    phase: TransitionPhase,
    active: Option<ActiveTransition>,
}

impl TransitionStepper {
    pub fn new(widget: usize, config: &MorphConfig) -> Self {
        Self {
            widget,
            matcher: CorrespondenceMatcher::new(config.relation_attr.clone()),
            step_total: config.step_total.max(1),
            step_interval: config.step_interval,
            phase: TransitionPhase::Idle,
            active: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn step_index(&self) -> Option<u32> {
        self.active.as_ref().map(|a| a.step_index)
    }

    pub fn step_total(&self) -> u32 {
        self.step_total
    }

    /// Pairs of the transition in flight; empty when idle.
    pub fn pairs(&self) -> &[CorrespondencePair] {
        self.active.as_ref().map(|a| a.pairs.as_slice()).unwrap_or(&[])
    }

    /// `(source, dest)` slides of the transition in flight.
    pub fn slides(&self) -> Option<(NodeId, NodeId)> {
        self.active.as_ref().map(|a| (a.source, a.dest))
    }

    /// Prepares a transition from `source` to `dest`.
    ///
    /// Any transition still in flight is completed first, callback included.
    /// If the slides cannot be measured, `on_complete` still runs before the
    /// error is returned.
    pub fn arm(
        &mut self,
        document: &mut Document,
        scheduler: &mut Scheduler,
        source: NodeId,
        dest: NodeId,
        on_complete: CompletionCallback,
    ) -> MorphResult<()> {
        if let Err(err) = self.finish(document, scheduler) {
            warn!(widget = self.widget, "completion of interrupted transition failed: {err:#}");
        }

        let prepared = self.matcher.find(document, source, dest).and_then(|pairs| {
            let elements: Vec<NodeId> = std::iter::once(source)
                .chain(document.descendant_elements(source))
                .chain(std::iter::once(dest))
                .chain(document.descendant_elements(dest))
                .collect();
            let freeze = LayoutFreezer::freeze(document, &elements)?;
            Ok((pairs, freeze))
        });
        let (pairs, freeze) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                if let Err(callback_err) = on_complete(document) {
                    warn!(widget = self.widget, "completion callback failed: {callback_err:#}");
                }
                return Err(err);
            }
        };

        debug!(
            widget = self.widget,
            %source,
            %dest,
            pairs = pairs.len(),
            frozen = freeze.len(),
            "transition armed"
        );
        self.active = Some(ActiveTransition {
            source,
            dest,
            pairs,
            freeze,
            step_index: 0,
            timer: None,
            on_complete: Some(on_complete),
        });
        self.phase = TransitionPhase::Armed;
        Ok(())
    }

    /// Applies step 0 and starts the step timer.
    pub fn start(&mut self, document: &mut Document, scheduler: &mut Scheduler) -> MorphResult<()> {
        if self.phase != TransitionPhase::Armed {
            return Err(MorphError::InvalidOperation {
                op: "start",
                reason: "no transition is armed",
            });
        }
        let Some(active) = self.active.as_mut() else {
            return Err(MorphError::InvalidOperation {
                op: "start",
                reason: "no transition is armed",
            });
        };
        apply_step(document, active, 0.0)?;
        active.timer = Some(scheduler.set_interval(
            self.step_interval,
            TimerTarget { widget: self.widget, kind: TimerKind::Step },
        ));
        self.phase = TransitionPhase::Running;
        Ok(())
    }

    /// Advances a running transition by one step, completing it on the last.
    pub fn step(
        &mut self,
        document: &mut Document,
        scheduler: &mut Scheduler,
    ) -> anyhow::Result<StepOutcome> {
        if self.phase != TransitionPhase::Running {
            return Ok(StepOutcome::Idle);
        }
        let Some(active) = self.active.as_mut() else {
            return Ok(StepOutcome::Idle);
        };

        active.step_index = (active.step_index + 1).min(self.step_total);
        let index = active.step_index;
        let ratio = index as f32 / self.step_total as f32;
        let applied = apply_step(document, active, ratio);
        trace!(widget = self.widget, step = index, ratio, "transition step");

        if index >= self.step_total {
            // The last step completes the transition even if it failed to apply.
            let completed = self.finish(document, scheduler);
            applied?;
            completed?;
            return Ok(StepOutcome::Completed);
        }
        applied?;
        Ok(StepOutcome::Stepped(index))
    }

    /// Ends the transition in flight, wherever it is.
    ///
    /// Cancels the step timer, runs the completion callback, then restores every
    /// style the freeze replaced. The restore happens even when the callback
    /// fails or panics; a callback error is returned afterwards and a panic is
    /// resumed. Finishing while idle does nothing.
    pub fn finish(&mut self, document: &mut Document, scheduler: &mut Scheduler) -> anyhow::Result<()> {
        let Some(mut active) = self.active.take() else {
            return Ok(());
        };
        let interrupted = self.phase == TransitionPhase::Running && active.step_index < self.step_total;
        self.phase = TransitionPhase::Idle;

        if let Some(timer) = active.timer.take() {
            scheduler.clear(timer);
        }

        let outcome = match active.on_complete.take() {
            Some(callback) => panic::catch_unwind(AssertUnwindSafe(|| callback(&mut *document))),
            None => Ok(Ok(())),
        };
        active.freeze.undo(document);
        debug!(
            widget = self.widget,
            source = %active.source,
            dest = %active.dest,
            step = active.step_index,
            interrupted,
            "transition finished"
        );

        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

fn apply_step(document: &mut Document, active: &ActiveTransition, ratio: f32) -> MorphResult<()> {
    document.style_mut(active.source)?.opacity = Some(1.0 - ratio);
    document.style_mut(active.dest)?.opacity = Some(ratio);
    for pair in &active.pairs {
        let rect = pair.source.snapshot.interpolate(&pair.dest.snapshot, ratio);
        move_to(document, pair.source.element, rect)?;
        move_to(document, pair.dest.element, rect)?;
    }
    Ok(())
}

fn move_to(document: &mut Document, id: NodeId, rect: Rect) -> MorphResult<()> {
    let style = document.style_mut(id)?;
    style.width = Some(rect.width);
    style.height = Some(rect.height);
    document.set_offset(id, rect.left, rect.top)
}
