//! DOM listener bookkeeping and pointer helpers.

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Owns every listener it registers so they can all be removed again.
#[derive(Default)]
pub struct Listeners {
    list: Vec<Listener>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        self.add_inner(target, kind, handler, None);
    }

    /// Register a listener that may call `prevent_default` (wheel, touch).
    pub fn add_active(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        self.add_inner(target, kind, handler, Some(opts));
    }

    fn add_inner(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
        opts: Option<web::AddEventListenerOptions>,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let res = match &opts {
            Some(o) => target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                o,
            ),
            None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
        };
        if let Err(e) = res {
            log::error!("[events] failed to add {kind} listener: {e:?}");
            return;
        }
        self.list.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every registered listener and drop its closure.
    pub fn release(&mut self) {
        for l in self.list.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.release();
    }
}

/// Pointer position in normalized device coordinates of the viewport
/// (x right, y up, both in -1..1).
#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0) as f32;
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
        .max(1.0) as f32;
    let x = ev.client_x() as f32 / w * 2.0 - 1.0;
    let y = 1.0 - ev.client_y() as f32 / h * 2.0;
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}
