use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::ROTATION_OPTIONS;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_search: Callback<()>,
    pub on_kiss: Callback<()>,
    pub rotation: AttrValue,
    pub on_rotation: Callback<String>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let search_cb = {
        let cb = props.on_search.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let kiss_cb = {
        let cb = props.on_kiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rotation_cb = {
        let cb = props.on_rotation.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target_dyn_into::<HtmlSelectElement>()
                .map(|el| el.value())
                .unwrap_or_default();
            cb.emit(value)
        })
    };
    html! {<div style="position:absolute; left:50%; bottom:24px; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:10px; padding:8px 10px; display:flex; gap:8px; align-items:center;">
        <button id="searchBtn" onclick={search_cb}>{"Search"}</button>
        <button id="kissBtn" onclick={kiss_cb} style="background:#ff2a2a; color:#fff;">{"Kiss!"}</button>
        <label style="display:flex; align-items:center; gap:6px; font-size:13px;">
            <span>{"Rotate"}</span>
            <select id="rotationSelect" onchange={rotation_cb}>
                { for ROTATION_OPTIONS.iter().map(|deg| {
                    let value = deg.to_string();
                    let selected = props.rotation.as_str() == value;
                    html! { <option value={value.clone()} selected={selected}>{ format!("{}°", deg) }</option> }
                }) }
            </select>
        </label>
    </div>}
}
