//! Window preview of a running engine, drawn with raylib.
//!
//! Every element is drawn as its rendered box outline at its effective opacity;
//! slides that are not selected are hidden the way the page stylesheet hides
//! them. Arrow keys click the first widget's controls, `A` starts autorun,
//! up/down scroll the page.

use std::time::Duration;

use raylib::prelude::*;
use tracing::info;

use crate::constants::*;
use crate::dom::{Document, NodeId, NodeKind};
use crate::engine::SlideShowEngine;

const FPS: u32 = 60;
const SCROLL_STEP: f32 = 40.0;

pub fn run(engine: &mut SlideShowEngine, width: i32, height: i32) -> anyhow::Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("slidemorph preview")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    info!(width, height, "preview window opened");

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // --- Input ---
        if let Some(show) = engine.widgets().first() {
            let (rev, fwd) = (show.rev_button(), show.fwd_button());
            if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
                engine.click(fwd)?;
            }
            if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
                engine.click(rev)?;
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_A) {
            engine.autorun_all();
        }
        let scroll_top = engine.viewport().scroll_top;
        if rl.is_key_down(KeyboardKey::KEY_DOWN) {
            engine.scroll_to(scroll_top + SCROLL_STEP * dt * FPS as f32);
        }
        if rl.is_key_down(KeyboardKey::KEY_UP) {
            engine.scroll_to((scroll_top - SCROLL_STEP * dt * FPS as f32).max(0.0));
        }

        // --- Update ---
        engine.advance(Duration::from_secs_f32(dt.max(0.0)))?;

        // --- Draw ---
        let scroll_top = engine.viewport().scroll_top;
        let document = engine.document();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        for id in document.descendant_elements(document.root()) {
            if is_hidden(document, id) {
                continue;
            }
            let Ok(rect) = document.rendered_box(id) else {
                continue;
            };
            let alpha = (document.effective_opacity(id).clamp(0.0, 1.0) * 255.0) as u8;
            if alpha == 0 {
                continue;
            }
            let color = if document.attribute(id, &engine.config().relation_attr).is_some() {
                Color::new(255, 200, 0, alpha)
            } else {
                Color::new(255, 255, 255, alpha)
            };
            let top = rect.top - scroll_top;
            d.draw_rectangle_lines_ex(Rectangle::new(rect.left, top, rect.width, rect.height), 1.0, color);

            let label = own_text(document, id);
            if !label.is_empty() {
                d.draw_text(&label, rect.left as i32 + 4, top as i32 + 4, 20, color);
            }
        }
    }
    Ok(())
}

/// Slides of an active slideshow are only shown while selected.
fn is_hidden(document: &Document, id: NodeId) -> bool {
    std::iter::successors(Some(id), |&n| document.parent(n)).any(|n| {
        document.tag_name(n) == Some(SLIDE_TAG)
            && !document.has_class(n, SELECTED_CLASS)
            && document.parent(n).is_some_and(|list| document.has_class(list, ACTIVE_CLASS))
    })
}

fn own_text(document: &Document, id: NodeId) -> String {
    document
        .children(id)
        .iter()
        .filter_map(|&child| match document.node(child).map(|node| &node.kind) {
            Ok(NodeKind::Text(text)) => Some(text.trim()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
