use std::rc::Rc;

mod camera;
mod components;
mod config;
mod error;
mod model;
mod snapshot;
mod state;
mod util;

use components::{App, AppProps};
use config::WidgetConfig;
use error::TryOnError;
use web_sys::Element;

fn main() {
    console_error_panic_hook::set_once();
    let (config, config_err) = match WidgetConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (WidgetConfig::default(), Some(e)),
    };
    wasm_logger::init(wasm_logger::Config::new(config.level()));
    if let Some(e) = config_err {
        log::warn!("using default try-on config: {}", e);
    }
    if let Err(e) = mount(config) {
        log::info!("try-on widget not mounted: {}", e);
    }
}

/// Where the app is rendered. yew clears its root element, so the widget never
/// mounts into `<body>` itself.
#[derive(Debug, PartialEq, Eq)]
enum MountTarget {
    Existing,
    AppendedContainer,
}

fn mount_target(mount_element_exists: bool) -> MountTarget {
    if mount_element_exists {
        MountTarget::Existing
    } else {
        MountTarget::AppendedContainer
    }
}

/// Mounts the widget when the host page carries a trigger button; otherwise does nothing.
fn mount(config: WidgetConfig) -> error::Result<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(TryOnError::MissingGlobal("document"))?;
    if document.get_element_by_id(&config.trigger_id).is_none() {
        return Err(TryOnError::MissingElement(config.trigger_id));
    }
    let existing = document.get_element_by_id(&config.mount_id);
    let root: Element = match (mount_target(existing.is_some()), existing) {
        (MountTarget::Existing, Some(el)) => el,
        _ => {
            let body = document
                .body()
                .ok_or_else(|| TryOnError::MissingElement("body".to_string()))?;
            let container = document.create_element("div")?;
            container.set_id(&config.mount_id);
            body.append_child(&container)?;
            log::debug!("appended #{} to <body>", config.mount_id);
            container
        }
    };
    log::debug!("mounting try-on widget for #{}", config.trigger_id);
    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
    Ok(())
}
