use crate::constants::PLACEHOLDER_PICTURE_SIZE;
use js_sys::Uint8Array;
use melt_core::{GlowSprite, SourceImage};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("GET {} returned {}", url, resp.status());
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

/// Glow sprite from `url`, or the procedural radial sprite.
pub async fn load_glow(url: &str) -> GlowSprite {
    let loaded = match fetch_bytes(url).await {
        Ok(bytes) => GlowSprite::from_image_bytes(&bytes).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(glow) => {
            log::info!("[assets] glow {:?} from {}", glow.dimensions(), url);
            glow
        }
        Err(e) => {
            log::warn!("[assets] glow unavailable ({}); using radial sprite", e);
            GlowSprite::default()
        }
    }
}

/// Default picture from `url`, or the procedural placeholder.
pub async fn load_picture(url: &str) -> SourceImage {
    let loaded = match fetch_bytes(url).await {
        Ok(bytes) => SourceImage::decode(&bytes).map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(picture) => {
            log::info!(
                "[assets] picture {}x{} from {}",
                picture.width(),
                picture.height(),
                url
            );
            picture
        }
        Err(e) => {
            log::warn!("[assets] picture unavailable ({}); using placeholder", e);
            SourceImage::placeholder(PLACEHOLDER_PICTURE_SIZE)
        }
    }
}
