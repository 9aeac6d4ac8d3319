use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::countdown_display::CountdownDisplay;
use crate::levels::Landmark;
use crate::state::{Countdown, CountdownEvent};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct LandmarkViewProps {
    pub landmark: Landmark,
    /// Fired when the countdown expires or the player skips ahead.
    pub to_map: Callback<()>,
}

#[function_component(LandmarkView)]
pub fn landmark_view(props: &LandmarkViewProps) -> Html {
    let countdown = use_mut_ref(Countdown::default);
    let secs_left = use_state(|| countdown.borrow().secs_left());

    // Seconds interval, cleared on unmount
    {
        let countdown = countdown.clone();
        let secs_left = secs_left.clone();
        let to_map = props.to_map.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let second_tick = Closure::wrap(Box::new(move || {
                let event = countdown.borrow_mut().tick();
                match event {
                    CountdownEvent::Tick { secs_left: s } => secs_left.set(s),
                    CountdownEvent::Finished => {
                        secs_left.set(0);
                        clog("landmark countdown finished");
                        to_map.emit(());
                    }
                    CountdownEvent::Expired => {}
                }
            }) as Box<dyn FnMut()>);
            let second_tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    second_tick.as_ref().unchecked_ref(),
                    crate::state::countdown::TICK_MS as i32,
                )
                .unwrap_or_else(|_| {
                    clog("failed to start landmark countdown");
                    0
                });
            move || {
                window.clear_interval_with_handle(second_tick_id);
                drop(second_tick);
            }
        });
    }

    let ready_btn = {
        let cb = props.to_map.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="position:relative; width:100vw; height:100vh; background:#0e1116; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:16px;">
        <CountdownDisplay secs_left={*secs_left} label={"Memorise this place"} />
        <img src={props.landmark.photo.clone()} alt="Mystery landmark" style="max-width:90vw; max-height:70vh; border-radius:10px; border:1px solid #30363d;" />
        <button onclick={ready_btn}>{"I'm ready"}</button>
    </div>}
}
