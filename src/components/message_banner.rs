use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MessageBannerProps {
    pub message: AttrValue,
}

#[function_component]
pub fn MessageBanner(props: &MessageBannerProps) -> Html {
    html! {<div id="message" style="position:absolute; top:18px; left:50%; transform:translateX(-50%); font-size:26px; font-weight:700; color:#fff; text-shadow:0 2px 8px rgba(0,0,0,0.7); text-align:center; white-space:nowrap; pointer-events:none;">
        { props.message.clone() }
    </div>}
}
