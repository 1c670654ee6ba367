//! Drives every slideshow widget of a document off one virtual clock.

use std::time::Duration;

use tracing::{debug, info};

use crate::autorun::Viewport;
use crate::config::MorphConfig;
use crate::constants::*;
use crate::dom::{Document, NodeId};
use crate::error::{MorphError, MorphResult};
use crate::scheduler::Scheduler;
use crate::slideshow::{Host, SlideShow};

pub struct SlideShowEngine {
    document: Document,
    scheduler: Scheduler,
    viewport: Viewport,
    config: MorphConfig,
    shows: Vec<SlideShow>,
}

impl SlideShowEngine {
    pub fn new(document: Document, viewport: Viewport, config: MorphConfig) -> MorphResult<Self> {
        config.validate()?;
        Ok(Self {
            document,
            scheduler: Scheduler::new(),
            viewport,
            config,
            shows: Vec::new(),
        })
    }

    /// Activates every `ol.slideshow` not activated yet; returns how many were.
    ///
    /// Lists without slides are skipped silently and stay inactive.
    pub fn animate_slide_shows(&mut self) -> MorphResult<usize> {
        let lists = self.document.find_all(self.document.root(), |el| {
            el.tag == SLIDESHOW_TAG && el.has_class(SLIDESHOW_CLASS) && !el.has_class(ACTIVE_CLASS)
        });

        let mut activated = 0;
        for list in lists {
            let index = self.shows.len();
            if let Some(show) = SlideShow::activate(index, list, &mut self.document, &self.config)? {
                self.shows.push(show);
                activated += 1;
            }
        }
        info!(activated, total = self.shows.len(), "slideshows activated");
        Ok(activated)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn widgets(&self) -> &[SlideShow] {
        &self.shows
    }

    pub fn widget(&self, widget: usize) -> MorphResult<&SlideShow> {
        self.shows.get(widget).ok_or(MorphError::UnknownWidget(widget))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_to(&mut self, scroll_top: f32) {
        self.viewport.scroll_top = scroll_top;
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    fn parts(&mut self, widget: usize) -> MorphResult<(&mut SlideShow, Host<'_>)> {
        let show = self.shows.get_mut(widget).ok_or(MorphError::UnknownWidget(widget))?;
        let host = Host {
            document: &mut self.document,
            scheduler: &mut self.scheduler,
            viewport: &self.viewport,
        };
        Ok((show, host))
    }

    /// Programmatic navigation; returns whether a transition started.
    pub fn navigate(&mut self, widget: usize, delta: i64) -> MorphResult<bool> {
        let (show, mut host) = self.parts(widget)?;
        show.transition_by(&mut host, delta)
    }

    /// Dispatches a click; returns whether some widget's control was hit.
    pub fn click(&mut self, node: NodeId) -> MorphResult<bool> {
        for widget in 0..self.shows.len() {
            let (show, mut host) = self.parts(widget)?;
            if show.click(&mut host, node)? {
                return Ok(true);
            }
        }
        debug!(%node, "click on a node that is not a slideshow control");
        Ok(false)
    }

    pub fn autorun(&mut self, widget: usize) -> MorphResult<()> {
        let (show, host) = self.parts(widget)?;
        show.start_autorun(host.scheduler);
        Ok(())
    }

    pub fn stop_autorun(&mut self, widget: usize) -> MorphResult<()> {
        let (show, host) = self.parts(widget)?;
        show.stop_autorun(host.scheduler);
        Ok(())
    }

    pub fn autorun_all(&mut self) {
        for show in &mut self.shows {
            show.start_autorun(&mut self.scheduler);
        }
    }

    /// Completes every transition in flight.
    pub fn finish_all(&mut self) {
        for widget in 0..self.shows.len() {
            if let Ok((show, mut host)) = self.parts(widget) {
                show.finish_transition(&mut host);
            }
        }
    }

    pub fn advance(&mut self, dt: Duration) -> MorphResult<()> {
        let until = self.scheduler.now() + dt;
        self.advance_to(until)
    }

    /// Moves the clock to `until`, firing every timer due on the way in order.
    pub fn advance_to(&mut self, until: Duration) -> MorphResult<()> {
        while let Some(fired) = self.scheduler.pop_due(until) {
            let (show, mut host) = self.parts(fired.target.widget)?;
            show.on_timer(&mut host, fired.target.kind)?;
        }
        self.scheduler.settle(until);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup;
    use crate::scheduler::TimerKind;

    const PAGE: &str = r#"<body>
        <ol class="slideshow" data-box="0 0 400 300">
          <li data-box="0 0 400 300"><h2 data-ss-id="title" data-box="10 10 200 40">One</h2></li>
          <li data-box="0 0 400 300"><h2 data-ss-id="title" data-box="100 200 100 20">Two</h2></li>
        </ol>
        <ol class="slideshow" data-box="0 2000 400 300">
          <li data-box="0 2000 400 300">A</li>
          <li data-box="0 2000 400 300">B</li>
        </ol>
        <ol class="slideshow"></ol>
        <ol><li>not a slideshow</li></ol>
      </body>"#;

    fn engine() -> SlideShowEngine {
        let document = markup::parse(PAGE).unwrap();
        let mut engine =
            SlideShowEngine::new(document, Viewport::new(0.0, 800.0), MorphConfig::default()).unwrap();
        assert_eq!(engine.animate_slide_shows().unwrap(), 2);
        engine
    }

    fn selected(engine: &SlideShowEngine, widget: usize) -> Vec<usize> {
        let show = engine.widget(widget).unwrap();
        show.slides()
            .iter()
            .enumerate()
            .filter(|(_, slide)| engine.document().has_class(**slide, SELECTED_CLASS))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_activation_is_idempotent() {
        let mut engine = engine();
        assert_eq!(engine.animate_slide_shows().unwrap(), 0);
        assert_eq!(engine.widgets().len(), 2);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MorphConfig::default().with_step_total(0);
        assert!(SlideShowEngine::new(Document::new(), Viewport::new(0.0, 1.0), config).is_err());
    }

    #[test]
    fn test_transition_runs_on_the_clock() {
        let mut engine = engine();
        assert!(engine.navigate(0, 1).unwrap());
        assert_eq!(selected(&engine, 0), vec![0, 1]);

        engine.advance(Duration::from_millis(999)).unwrap();
        assert_eq!(selected(&engine, 0), vec![0, 1]);

        engine.advance(Duration::from_millis(1)).unwrap();
        assert_eq!(selected(&engine, 0), vec![1]);
        assert_eq!(engine.scheduler().pending(), 0);
    }

    #[test]
    fn test_widgets_are_independent() {
        let mut engine = engine();
        engine.navigate(0, 1).unwrap();
        engine.navigate(1, -1).unwrap();
        engine.advance(Duration::from_secs(1)).unwrap();
        assert_eq!(selected(&engine, 0), vec![1]);
        assert_eq!(selected(&engine, 1), vec![1]);
    }

    #[test]
    fn test_autorun_only_advances_visible_widgets() {
        let mut engine = engine();
        engine.autorun_all();
        engine.advance(Duration::from_millis(2000)).unwrap();
        assert!(engine.widget(0).unwrap().stepper().is_active());
        assert!(!engine.widget(1).unwrap().stepper().is_active());

        engine.scroll_to(1800.0);
        engine.advance(Duration::from_millis(2000)).unwrap();
        assert_eq!(engine.widget(0).unwrap().selected_index(), 1);
        assert_eq!(engine.widget(1).unwrap().selected_index(), 1);
    }

    #[test]
    fn test_click_cancels_autorun() {
        let mut engine = engine();
        engine.autorun(0).unwrap();
        let fwd = engine.widget(0).unwrap().fwd_button();
        assert!(engine.click(fwd).unwrap());
        assert!(!engine.widget(0).unwrap().is_autorunning());
        assert_eq!(engine.scheduler().pending_of(TimerKind::Autorun), 0);

        let root = engine.document().root();
        assert!(!engine.click(root).unwrap());
    }

    #[test]
    fn test_unknown_widget() {
        let mut engine = engine();
        assert_eq!(engine.navigate(9, 1), Err(MorphError::UnknownWidget(9)));
    }
}
