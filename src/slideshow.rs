//! One slideshow widget: an `ol` whose `li` children are the slides.
//!
//! All the mutable state of a widget lives here. The page it acts on is passed
//! in on every call through a [`Host`], so independent widgets share nothing
//! but the document and the clock.

use tracing::{debug, warn};

use crate::autorun::{AutorunScheduler, Viewport};
use crate::config::MorphConfig;
use crate::constants::*;
use crate::dom::{Document, NodeId};
use crate::error::MorphResult;
use crate::navigator::SlideNavigator;
use crate::scheduler::{Scheduler, TimerKind};
use crate::stepper::{CompletionCallback, TransitionStepper};

/// The page a widget acts on during one call
pub struct Host<'a> {
    pub document: &'a mut Document,
    pub scheduler: &'a mut Scheduler,
    pub viewport: &'a Viewport,
}

pub struct SlideShow {
    index: usize,
    list: NodeId,
    slides: Vec<NodeId>,
    rev_button: NodeId,
    fwd_button: NodeId,
    navigator: SlideNavigator,
    stepper: TransitionStepper,
    autorun: AutorunScheduler,
}

impl SlideShow {
    /// Turns `list` into a live widget: selects the first slide and inserts the
    /// previous/next controls before it. Lists without slides are left alone.
    pub fn activate(
        index: usize,
        list: NodeId,
        document: &mut Document,
        config: &MorphConfig,
    ) -> MorphResult<Option<Self>> {
        let slides: Vec<NodeId> = document
            .element_children(list)
            .into_iter()
            .filter(|&child| document.tag_name(child) == Some(SLIDE_TAG))
            .collect();
        let Some(navigator) = SlideNavigator::new(slides.len()) else {
            debug!(widget = index, %list, "slideshow without slides skipped");
            return Ok(None);
        };
        let first = slides[0];
        document.add_class(first, SELECTED_CLASS)?;

        let rev_button = create_button(document, REV_CLASS, REV_LABEL)?;
        let fwd_button = create_button(document, FWD_CLASS, FWD_LABEL)?;
        document.insert_before(list, rev_button, Some(first))?;
        document.insert_before(list, fwd_button, Some(first))?;
        document.add_class(list, ACTIVE_CLASS)?;

        debug!(widget = index, %list, slides = slides.len(), "slideshow activated");
        Ok(Some(Self {
            index,
            list,
            slides,
            rev_button,
            fwd_button,
            navigator,
            stepper: TransitionStepper::new(index, config),
            autorun: AutorunScheduler::new(index, config.autorun_interval),
        }))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn selected_index(&self) -> usize {
        self.navigator.current()
    }

    pub fn rev_button(&self) -> NodeId {
        self.rev_button
    }

    pub fn fwd_button(&self) -> NodeId {
        self.fwd_button
    }

    pub fn stepper(&self) -> &TransitionStepper {
        &self.stepper
    }

    pub fn is_autorunning(&self) -> bool {
        self.autorun.is_running()
    }

    /// Moves the selection by `delta` slides and animates the change.
    ///
    /// Returns `false` when `delta` lands on the current slide; nothing happens
    /// then, not even completion of a transition in flight.
    pub fn transition_by(&mut self, host: &mut Host<'_>, delta: i64) -> MorphResult<bool> {
        let Some((old, new)) = self.navigator.select_next(delta) else {
            return Ok(false);
        };

        // The interrupted transition may deselect the slide we are about to
        // select, so it has to finish before `new` is marked.
        if let Err(err) = self.stepper.finish(host.document, host.scheduler) {
            warn!(widget = self.index, "completion of interrupted transition failed: {err:#}");
        }

        let old_slide = self.slides[old];
        let new_slide = self.slides[new];
        debug!(widget = self.index, from = old, to = new, "navigating");
        host.document.add_class(new_slide, SELECTED_CLASS)?;

        let deselect_old: CompletionCallback =
            Box::new(move |document: &mut Document| -> anyhow::Result<()> {
                document.remove_class(old_slide, SELECTED_CLASS)?;
                Ok(())
            });
        self.stepper
            .arm(host.document, host.scheduler, old_slide, new_slide, deselect_old)?;
        self.stepper.start(host.document, host.scheduler)?;
        Ok(true)
    }

    /// Handles a click on `node`; returns whether it was one of this widget's controls.
    ///
    /// Explicit navigation always cancels autorun.
    pub fn click(&mut self, host: &mut Host<'_>, node: NodeId) -> MorphResult<bool> {
        let delta = if node == self.rev_button {
            -1
        } else if node == self.fwd_button {
            1
        } else {
            return Ok(false);
        };
        self.autorun.stop(host.scheduler);
        self.transition_by(host, delta)?;
        Ok(true)
    }

    pub fn start_autorun(&mut self, scheduler: &mut Scheduler) {
        self.autorun.start(scheduler);
    }

    pub fn stop_autorun(&mut self, scheduler: &mut Scheduler) {
        self.autorun.stop(scheduler);
    }

    /// Dispatches one of this widget's timers.
    pub fn on_timer(&mut self, host: &mut Host<'_>, kind: TimerKind) -> MorphResult<()> {
        match kind {
            TimerKind::Autorun => {
                let widget_box = host.document.rendered_box(self.list)?;
                if self.autorun.should_advance(host.viewport, &widget_box) {
                    self.transition_by(host, 1)?;
                }
            }
            TimerKind::Step => {
                if let Err(err) = self.stepper.step(host.document, host.scheduler) {
                    warn!(widget = self.index, "transition step failed: {err:#}");
                }
            }
        }
        Ok(())
    }

    /// Completes any transition in flight immediately.
    pub fn finish_transition(&mut self, host: &mut Host<'_>) {
        if let Err(err) = self.stepper.finish(host.document, host.scheduler) {
            warn!(widget = self.index, "completion of transition failed: {err:#}");
        }
    }
}

fn create_button(document: &mut Document, class: &str, label: &str) -> MorphResult<NodeId> {
    let button = document.create_element("button");
    document.add_class(button, class)?;
    let text = document.create_text(label);
    document.append_child(button, text)?;
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn list_with(doc: &mut Document, count: usize) -> NodeId {
        let list = doc.create_element("ol");
        let root = doc.root();
        doc.append_child(root, list).unwrap();
        for i in 0..count {
            let slide = doc.create_element("li");
            doc.set_natural_box(slide, Rect::new(0.0, i as f32, 100.0, 100.0)).unwrap();
            doc.append_child(list, slide).unwrap();
        }
        list
    }

    #[test]
    fn test_activate_inserts_controls() {
        let mut doc = Document::new();
        let list = list_with(&mut doc, 2);
        let show = SlideShow::activate(0, list, &mut doc, &MorphConfig::default())
            .unwrap()
            .unwrap();

        let children = doc.element_children(list);
        assert_eq!(children[0], show.rev_button());
        assert_eq!(children[1], show.fwd_button());
        assert_eq!(&children[2..], show.slides());
        assert!(doc.has_class(list, ACTIVE_CLASS));
        assert!(doc.has_class(show.slides()[0], SELECTED_CLASS));
        assert_eq!(doc.text_content(show.rev_button()), "\u{ab}");
        assert!(doc.has_class(show.fwd_button(), FWD_CLASS));
    }

    #[test]
    fn test_activate_without_slides() {
        let mut doc = Document::new();
        let list = list_with(&mut doc, 0);
        let before = doc.len();
        assert!(SlideShow::activate(0, list, &mut doc, &MorphConfig::default()).unwrap().is_none());
        assert_eq!(doc.len(), before);
        assert!(!doc.has_class(list, ACTIVE_CLASS));
    }

    #[test]
    fn test_going_back_to_interrupted_source_keeps_it_selected() {
        let mut doc = Document::new();
        let list = list_with(&mut doc, 3);
        let mut show = SlideShow::activate(0, list, &mut doc, &MorphConfig::default())
            .unwrap()
            .unwrap();
        let mut scheduler = Scheduler::new();
        let viewport = Viewport::new(0.0, 800.0);
        let mut host = Host { document: &mut doc, scheduler: &mut scheduler, viewport: &viewport };

        assert!(show.transition_by(&mut host, 1).unwrap());
        assert!(show.transition_by(&mut host, -1).unwrap());
        show.finish_transition(&mut host);

        let slides = show.slides().to_vec();
        assert!(doc.has_class(slides[0], SELECTED_CLASS));
        assert!(!doc.has_class(slides[1], SELECTED_CLASS));
        assert_eq!(show.selected_index(), 0);
    }
}
