use melt_core::ViewportState;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{} has the wrong type: {:?}", id, e)))
}

/// Logical canvas size (CSS pixels) and the device pixel ratio.
pub fn viewport_state(canvas: &web::HtmlCanvasElement) -> ViewportState {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    ViewportState::new(rect.width() as f32, rect.height() as f32, dpr as f32)
}

/// Match the canvas drawing buffer to the viewport's physical size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &ViewportState) {
    let (w_px, h_px) = viewport.physical_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
}
