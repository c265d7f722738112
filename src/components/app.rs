use std::rc::Rc;

use super::{
    camera_view::CameraView, controls_panel::ControlsPanel, message_banner::MessageBanner,
    particle_overlay::ParticleOverlay,
};
use crate::config::KissCamConfig;
use crate::model::{Particle, StageAction, StageState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: Rc<KissCamConfig>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    // Page opens in the "searching" state
    let stage = {
        let message = config.search_message.clone();
        use_reducer(move || StageState {
            message,
            ..Default::default()
        })
    };
    let rotation = use_state(|| AttrValue::from("0"));

    let on_search = {
        let stage = stage.clone();
        let message = config.search_message.clone();
        Callback::from(move |_| {
            stage.dispatch(StageAction::BeginSearch {
                message: message.clone(),
            })
        })
    };
    let on_kiss = {
        let stage = stage.clone();
        let message = config.match_message.clone();
        let burst_size = config.burst_size;
        Callback::from(move |_| {
            log::info!("match confirmed, bursting {burst_size} hearts");
            stage.dispatch(StageAction::ConfirmMatch {
                message: message.clone(),
                particles: Particle::scatter(burst_size, js_sys::Math::random),
            })
        })
    };
    let on_rotation = {
        let rotation = rotation.clone();
        Callback::from(move |value: String| rotation.set(AttrValue::from(value)))
    };
    let on_expire = {
        let stage = stage.clone();
        Callback::from(move |burst: u32| stage.dispatch(StageAction::ExpireBurst(burst)))
    };

    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116;">
            <MessageBanner message={AttrValue::from(stage.message.clone())} />
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
                <CameraView config={config.clone()} rotation={(*rotation).clone()} />
            </div>
            <ParticleOverlay
                particles={stage.particles.clone()}
                burst={stage.active_burst()}
                ttl_ms={config.particle_ttl_ms}
                on_expire={on_expire}
            />
            <ControlsPanel
                on_search={on_search}
                on_kiss={on_kiss}
                rotation={(*rotation).clone()}
                on_rotation={on_rotation}
            />
        </div>
    }
}
