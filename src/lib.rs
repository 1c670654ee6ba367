//! Slide transitions that morph related elements from one slide to the next.
//!
//! A slideshow is an `ol.slideshow` whose `li` children are the slides. When
//! the selected slide changes, elements carrying the same relation attribute
//! (`data-ss-id` by default) in the old and the new slide move and resize as
//! one, while everything else cross-fades.
//!
//! The page is modelled by [`dom::Document`] and time by a virtual clock, so
//! every transition can be driven and inspected deterministically:
//!
//! ```rust
//! use std::time::Duration;
//! use slidemorph::{markup, MorphConfig, SlideShowEngine, Viewport};
//!
//! let document = markup::parse(
//!     r#"<ol class="slideshow">
//!          <li data-box="0 0 400 300"><h1 data-ss-id="title" data-box="0 0 400 40">One</h1></li>
//!          <li data-box="0 0 400 300"><h1 data-ss-id="title" data-box="0 200 200 20">Two</h1></li>
//!        </ol>"#,
//! ).unwrap();
//!
//! let mut engine = SlideShowEngine::new(document, Viewport::new(0.0, 800.0), MorphConfig::default()).unwrap();
//! engine.animate_slide_shows().unwrap();
//! engine.navigate(0, 1).unwrap();
//! engine.advance(Duration::from_secs(1)).unwrap();
//! assert_eq!(engine.widget(0).unwrap().selected_index(), 1);
//! ```

pub mod autorun;
pub mod config;
pub mod constants;
pub mod dom;
pub mod engine;
pub mod error;
pub mod freezer;
pub mod geometry;
pub mod html;
pub mod markup;
pub mod matcher;
pub mod navigator;
pub mod scheduler;
pub mod slideshow;
pub mod state;
pub mod stepper;

#[cfg(feature = "preview")]
pub mod preview;

pub use autorun::{AutorunScheduler, Viewport};
pub use config::MorphConfig;
pub use engine::SlideShowEngine;
pub use error::{MorphError, MorphResult};
pub use freezer::{FreezeToken, LayoutFreezer};
pub use geometry::{GeometrySnapshot, Point, Rect};
pub use html::Html;
pub use matcher::{CorrespondenceMatcher, CorrespondencePair};
pub use navigator::SlideNavigator;
pub use slideshow::{Host, SlideShow};
pub use state::TransitionPhase;
pub use stepper::{CompletionCallback, StepOutcome, TransitionStepper};
