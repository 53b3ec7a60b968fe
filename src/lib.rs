#![cfg(target_arch = "wasm32")]
use melt_core::{MeltParams, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use constants::{CANVAS_ID, FILE_INPUT_ID, GLOW_URL, PICTURE_URL};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("melt-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;

    let viewport = dom::viewport_state(&canvas);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let session = Rc::new(RefCell::new(Session::new(MeltParams::default(), viewport)));

    let glow = assets::load_glow(GLOW_URL).await;
    session.borrow_mut().set_glow(glow);
    let picture = assets::load_picture(PICTURE_URL).await;

    let gpu = frame::init_gpu(&canvas, &session, &picture)
        .await
        .ok_or_else(|| anyhow::anyhow!("WebGPU unavailable"))?;

    events::wire_input_handlers(&canvas, session.clone());
    events::wire_resize(&canvas, session.clone());
    events::wire_global_keydown(session.clone());
    events::wire_file_input(&document, FILE_INPUT_ID, session.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        gpu,
        stopped: false,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
