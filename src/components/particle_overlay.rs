use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::model::Particle;

const HEART_PATH: &str = "M23.6 2.6c-2.4 0-4.6 1.3-5.6 3.3-1-2-3.2-3.3-5.6-3.3C5.4 2.6 2 6 2 10.1c0 6.1 10.6 12.1 14 16.9 3.4-4.8 14-10.8 14-16.9 0-4.1-3.4-7.5-6.4-7.5z";

#[derive(Properties, PartialEq, Clone)]
pub struct ParticleOverlayProps {
    pub particles: Vec<Particle>,
    pub burst: Option<u32>,
    pub ttl_ms: u32,
    pub on_expire: Callback<u32>,
}

#[function_component]
pub fn ParticleOverlay(props: &ParticleOverlayProps) -> Html {
    // One timer per burst; a newer burst (or a clear) cancels the old one.
    {
        let on_expire = props.on_expire.clone();
        let ttl_ms = props.ttl_ms;
        use_effect_with(props.burst, move |burst| {
            let timer = (*burst).map(|b| Timeout::new(ttl_ms, move || on_expire.emit(b)));
            move || drop(timer)
        });
    }
    html! {<div id="particles" style="position:fixed; inset:0; pointer-events:none; overflow:hidden;">
        { for props.particles.iter().map(|p| {
            let style = format!(
                "--dx:{:.1}px; --rise:{:.1}px; --spin:{:.1}deg;",
                p.drift_x, -p.rise, p.spin_deg
            );
            html! {
                <div key={format!("{}-{}", p.burst, p.id)} class="heart-particle" style={style}>
                    <svg viewBox="0 0 32 29" width="100%" height="100%">
                        <path d={HEART_PATH} fill="#ff2a2a" />
                    </svg>
                </div>
            }
        }) }
    </div>}
}
