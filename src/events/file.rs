use crate::dom;
use js_sys::Uint8Array;
use melt_core::{accepts_mime, InputEvent, Session, SourceImage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// The file picker replaces the source picture. Unreadable or non-image
/// files are logged and the current picture stays bound.
pub fn wire_file_input(document: &web::Document, id: &str, session: Rc<RefCell<Session>>) {
    let input: web::HtmlInputElement = match dom::element_by_id(document, id) {
        Ok(el) => el,
        Err(e) => {
            log::warn!("[file] {:?}; picture upload disabled", e);
            return;
        }
    };
    let input_cb = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(file) = input_cb.files().and_then(|list| list.get(0)) else {
            return;
        };
        let mime = file.type_();
        if !accepts_mime(&mime) {
            log::warn!("[file] ignoring {} ({})", file.name(), mime);
            return;
        }
        let session = session.clone();
        spawn_local(async move {
            match read_file(&file).await {
                Ok(bytes) => match SourceImage::decode_with_mime(&bytes, &mime) {
                    Ok(image) => {
                        log::info!("[file] loaded {}", file.name());
                        session
                            .borrow_mut()
                            .push(InputEvent::ImageLoaded(Box::new(image)));
                    }
                    Err(e) => log::warn!("[file] {}: {}", file.name(), e),
                },
                Err(e) => log::warn!("[file] {}: {:?}", file.name(), e),
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

async fn read_file(file: &web::File) -> anyhow::Result<Vec<u8>> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}
