//! Widget configuration, read from an optional JSON block in the host page:
//! `<script type="application/json" id="tryonConfig">{ ... }</script>`.
//! Every field is optional; a block that fails to parse is reported and
//! replaced by the defaults at boot.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TryOnError};
use crate::state::ZoomPolicy;

pub const CONFIG_ELEMENT_ID: &str = "tryonConfig";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Host page button that opens the modal.
    pub trigger_id: String,
    /// Element the widget mounts into; `<body>` when absent.
    pub mount_id: String,
    /// Dataset key on the trigger holding the product image URL.
    pub image_url_key: String,
    pub facing_mode: String,
    #[serde(flatten)]
    pub zoom: ZoomPolicy,
    pub download_name: String,
    /// Open each capture in a new tab.
    pub open_preview: bool,
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            trigger_id: "tryOnBtn".to_string(),
            mount_id: "tryOnRoot".to_string(),
            image_url_key: "imageUrl".to_string(),
            facing_mode: "user".to_string(),
            zoom: ZoomPolicy::default(),
            download_name: "tryon.png".to_string(),
            open_preview: true,
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: WidgetConfig =
            serde_json::from_str(raw).map_err(|e| TryOnError::Config(e.to_string()))?;
        if !cfg.zoom.is_valid() {
            return Err(TryOnError::Config(format!(
                "invalid zoom policy {:?}",
                cfg.zoom
            )));
        }
        Ok(cfg)
    }

    /// Reads the config block from the current document. No block means defaults.
    pub fn load() -> Result<Self> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
