use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch a same-origin asset as raw bytes.
pub async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow!("fetch {path} failed: {e:?}"))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow!("fetch {path}: not a Response: {e:?}"))?;
    if !resp.ok() {
        return Err(anyhow!("fetch {path}: HTTP {}", resp.status()));
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow!("fetch {path}: body error: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("fetch {path}: body error: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
