//! Compositing the current video frame and the overlay into a PNG.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, DomRect, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement,
};

use crate::error::{Result, TryOnError, js_message};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

impl From<&DomRect> for Rect {
    fn from(r: &DomRect) -> Self {
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }
}

/// Native frame size, or `VideoNotReady` while the video has nothing decoded.
pub fn frame_size(video_width: u32, video_height: u32) -> Result<(u32, u32)> {
    if video_width == 0 {
        return Err(TryOnError::VideoNotReady);
    }
    Ok((video_width, video_height))
}

/// Maps the overlay's on-screen rect into canvas pixels, proportionally to
/// where it sits over the displayed video.
pub fn map_to_canvas(video: Rect, overlay: Rect, canvas_width: f64, canvas_height: f64) -> Rect {
    Rect::new(
        (overlay.x - video.x) / video.width * canvas_width,
        (overlay.y - video.y) / video.height * canvas_height,
        overlay.width / video.width * canvas_width,
        overlay.height / video.height * canvas_height,
    )
}

/// Canvas size and overlay placement for one capture, worked out before the
/// canvas is touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapturePlan {
    pub width: u32,
    pub height: u32,
    pub target: Rect,
}

impl CapturePlan {
    pub fn new(video_width: u32, video_height: u32, video: Rect, overlay: Rect) -> Result<Self> {
        let (width, height) = frame_size(video_width, video_height)?;
        let target = map_to_canvas(video, overlay, width as f64, height as f64);
        Ok(Self { width, height, target })
    }

    /// Reads the live element geometry.
    pub fn measure(video: &HtmlVideoElement, overlay_rect: Rect) -> Result<Self> {
        Self::new(
            video.video_width(),
            video.video_height(),
            Rect::from(&video.get_bounding_client_rect()),
            overlay_rect,
        )
    }
}

/// Reloads `src` into an offscreen image and resolves once it has decoded.
async fn load_image(src: &str) -> Result<HtmlImageElement> {
    let img = HtmlImageElement::new()?;
    img.set_cross_origin(Some("anonymous"));
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(src);
    let loaded = JsFuture::from(promise).await;
    img.set_onload(None);
    img.set_onerror(None);
    loaded.map_err(|_| TryOnError::ImageDecode)?;
    Ok(img)
}

pub struct Compositor {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Compositor {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| TryOnError::Canvas("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| TryOnError::Canvas("context is not 2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    /// Draws the frame, then the overlay image once decoded, and returns a PNG data URL.
    pub async fn capture(
        &self,
        video: &HtmlVideoElement,
        plan: &CapturePlan,
        overlay_src: &str,
    ) -> Result<String> {
        self.canvas.set_width(plan.width);
        self.canvas.set_height(plan.height);
        self.ctx.draw_image_with_html_video_element_and_dw_and_dh(
            video,
            0.0,
            0.0,
            plan.width as f64,
            plan.height as f64,
        )?;
        log::debug!("overlay mapped to canvas at {:?}", plan.target);

        let img = load_image(overlay_src).await?;
        let target = plan.target;
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &img,
            target.x,
            target.y,
            target.width,
            target.height,
        )?;
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| TryOnError::Canvas(js_message(&e)))
    }
}
