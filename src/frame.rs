use crate::render;
use melt_core::{Session, SourceImage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub gpu: render::GpuState,
    pub stopped: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // Input handlers only ever push; the borrow here is never contended.
        let mut session = self.session.borrow_mut();
        let out = session.tick();
        match self.gpu.render(&session, &out) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[frame] out of GPU memory; stopping");
                self.stopped = true;
            }
            Err(e) => log::warn!("[frame] skipped: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    session: &Rc<RefCell<Session>>,
    picture: &SourceImage,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, &session.borrow(), picture).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let stopped = {
            let mut ctx = frame_ctx_tick.borrow_mut();
            ctx.frame();
            ctx.stopped
        };
        if !stopped {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
