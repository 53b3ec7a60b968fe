use crate::{dom, input};
use melt_core::{InputEvent, Session};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer move, drag and wheel on the canvas become queued session input.
pub fn wire_input_handlers(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    wire_pointermove(canvas, session.clone());
    wire_pointerdown(canvas, session.clone());
    wire_pointerup(canvas, session.clone());
    wire_wheel(canvas, session);
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &c);
        session
            .borrow_mut()
            .push(InputEvent::PointerMove { x: pos.x, y: pos.y });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        _ = c.set_pointer_capture(ev.pointer_id());
        let pos = input::pointer_css_px(&ev, &c);
        session
            .borrow_mut()
            .push(InputEvent::DragStart { x: pos.x, y: pos.y });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        _ = c.release_pointer_capture(ev.pointer_id());
        session.borrow_mut().push(InputEvent::DragEnd);
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta_y = input::wheel_delta_px(&ev);
        if delta_y != 0.0 {
            session.borrow_mut().push(InputEvent::Wheel { delta_y });
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Window resizes resize the canvas buffer and queue a viewport update.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, session: Rc<RefCell<Session>>) {
    let c = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        let viewport = dom::viewport_state(&c);
        dom::sync_canvas_backing_size(&c, &viewport);
        session.borrow_mut().push(InputEvent::Resize {
            width: viewport.width,
            height: viewport.height,
            pixel_ratio: viewport.pixel_ratio,
        });
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
