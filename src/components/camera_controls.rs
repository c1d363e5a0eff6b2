use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub camera_active: bool,
    pub on_start: Callback<()>,
    pub on_stop: Callback<()>,
    pub on_capture: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let start = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stop = {
        let cb = props.on_stop.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let capture = {
        let cb = props.on_capture.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let status = if props.camera_active { "Camera on" } else { "Camera off" };
    html! {<div style="display:flex; gap:6px; align-items:center; margin-top:10px;">
        <button id="tryonStart" onclick={start}>{"Start camera"}</button>
        <button id="tryonStop" onclick={stop}>{"Stop"}</button>
        <button id="tryonCapture" onclick={capture}>{"Capture"}</button>
        <span style="font-size:12px; opacity:0.7; margin:0 8px;">{status}</span>
        <span style="flex:1;"></span>
        <button id="tryOnClose" onclick={close}>{"Close"}</button>
    </div>}
}
