#![cfg(target_arch = "wasm32")]
mod assets;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod scroll;

use helix_core::{
    load_glb, sample_keyframes, Camera, HelixVisual, MorphVisual, Page, PointerSmoother,
    SiteConfig, SmoothScroller, POINTER_SMOOTHING, SMOOTH_SCROLL_LERP, SMOOTH_SCROLL_SNAP_PX,
    WHEEL_MULTIPLIER,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedFrame = Rc<RefCell<frame::FrameContext<'static>>>;

struct App {
    frame_ctx: SharedFrame,
    frame_loop: frame::FrameLoop,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the frame loop, detach every listener and kill running tweens.
/// Safe to call more than once.
#[wasm_bindgen]
pub fn shutdown() {
    let Some(app) = APP.with(|a| a.borrow_mut().take()) else {
        return;
    };
    app.frame_loop.cancel();
    app.frame_ctx.borrow_mut().release();
    log::info!("[app] shut down");
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#scene-canvas is not a canvas"))?;
    dom::sync_canvas_backing_size(&canvas);

    let config = SiteConfig::default();
    let overlay = overlay::Overlay::collect(&document);
    let page = Page::new(overlay.element_counts(), config.scrub_tau_sec);
    let helix = HelixVisual::new(&config);
    let morph = MorphVisual::new(&config);
    let observer = scroll::ScrollObserver::new(&window, config.smooth_scroll);
    let smooth = config
        .smooth_scroll
        .then(|| SmoothScroller::new(SMOOTH_SCROLL_LERP, SMOOTH_SCROLL_SNAP_PX, WHEEL_MULTIPLIER));

    // Without WebGPU the page still scrolls and fades; only the backdrop is missing.
    let gpu = frame::init_gpu(&canvas, &helix).await;
    if gpu.is_none() {
        log::warn!("[app] running without a backdrop");
    }

    let mut camera = Camera::default();
    camera.set_viewport(canvas.width() as f32, canvas.height() as f32);
    let now = instant::Instant::now();
    let frame_ctx: SharedFrame = Rc::new(RefCell::new(frame::FrameContext {
        window,
        canvas,
        gpu,
        observer,
        overlay,
        page,
        helix,
        morph,
        smooth,
        pointer: PointerSmoother::new(POINTER_SMOOTHING),
        camera,
        start: now,
        last_instant: now,
    }));

    let frame_loop = frame::start_loop(frame_ctx.clone());
    let weak = Rc::downgrade(&frame_ctx);
    APP.with(|a| {
        *a.borrow_mut() = Some(App {
            frame_ctx,
            frame_loop,
        })
    });

    wasm_bindgen_futures::spawn_local(load_model(config, weak));
    Ok(())
}

/// Fetch, parse and sample the animated model, then hand the keyframes to the
/// morph visual. Any failure leaves the morph visual unavailable.
async fn load_model(config: SiteConfig, frame_ctx: Weak<RefCell<frame::FrameContext<'static>>>) {
    let bytes = match assets::fetch_bytes(&config.model_path).await {
        Ok(b) => b,
        Err(e) => {
            log::warn!("[model] fetch {} failed: {:?}", config.model_path, e);
            return;
        }
    };
    let model = match load_glb(&bytes) {
        Ok(m) => m,
        Err(e) => {
            log::error!("[model] parse failed: {e}");
            return;
        }
    };
    let Some(set) = sample_keyframes(
        &model,
        config.model_keyframes,
        config.model_particle_cap,
        config.model_seed(),
    ) else {
        return;
    };

    // Shut down while loading
    let Some(ctx) = frame_ctx.upgrade() else {
        return;
    };
    let mut ctx = ctx.borrow_mut();
    let now_sec = ctx.now_sec();
    if let Some(gpu) = &mut ctx.gpu {
        gpu.upload_keyframes(&set);
    }
    ctx.morph.set_keyframes(set, now_sec);
}
