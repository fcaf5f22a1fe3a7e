//! Scroll, wheel, resize and pointer observation.
//!
//! Handlers only record what happened; the frame loop drains the inbox once
//! per frame, so no visual state is touched from inside an event callback.

use crate::events::{pointer_ndc, Listeners};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const LINE_HEIGHT_PX: f64 = 16.0;

#[derive(Default, Clone, Copy, Debug)]
pub struct ScrollInbox {
    /// Accumulated wheel delta in pixels since the last drain.
    pub wheel_delta: f64,
    pub scrolled: bool,
    pub resized: bool,
    pub pointer: Option<Vec2>,
}

pub struct ScrollObserver {
    inbox: Rc<RefCell<ScrollInbox>>,
    listeners: Listeners,
}

impl ScrollObserver {
    /// Start observing `window`. With `capture_wheel` the native wheel scroll is
    /// suppressed and deltas are collected for the smooth scroller instead.
    pub fn new(window: &web::Window, capture_wheel: bool) -> Self {
        let inbox = Rc::new(RefCell::new(ScrollInbox {
            scrolled: true,
            ..Default::default()
        }));
        let mut listeners = Listeners::default();
        let target: &web::EventTarget = window.as_ref();

        {
            let inbox = inbox.clone();
            listeners.add(target, "scroll", move |_| {
                inbox.borrow_mut().scrolled = true;
            });
        }
        {
            let inbox = inbox.clone();
            listeners.add(target, "resize", move |_| {
                let mut i = inbox.borrow_mut();
                i.resized = true;
                i.scrolled = true;
            });
        }
        {
            let inbox = inbox.clone();
            let win = window.clone();
            listeners.add(target, "pointermove", move |ev| {
                if let Some(pe) = ev.dyn_ref::<web::PointerEvent>() {
                    inbox.borrow_mut().pointer = Some(pointer_ndc(pe, &win));
                }
            });
        }
        if capture_wheel {
            let inbox = inbox.clone();
            let win = window.clone();
            listeners.add_active(target, "wheel", move |ev| {
                let Some(we) = ev.dyn_ref::<web::WheelEvent>() else {
                    return;
                };
                if we.ctrl_key() {
                    // pinch zoom
                    return;
                }
                ev.prevent_default();
                let scale = match we.delta_mode() {
                    web::WheelEvent::DOM_DELTA_LINE => LINE_HEIGHT_PX,
                    web::WheelEvent::DOM_DELTA_PAGE => win
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0),
                    _ => 1.0,
                };
                inbox.borrow_mut().wheel_delta += we.delta_y() * scale;
            });
        }
        log::info!("[scroll] observing {} listeners", listeners.len());

        Self { inbox, listeners }
    }

    /// Everything recorded since the last call.
    pub fn drain(&self) -> ScrollInbox {
        std::mem::take(&mut *self.inbox.borrow_mut())
    }

    pub fn release(&mut self) {
        self.listeners.release();
    }
}
