use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GuessPanelProps {
    pub landmark_name: AttrValue,
    /// Rounded raw coordinates of the last tap, empty before the first one.
    pub coords_text: AttrValue,
    pub can_confirm: bool,
    pub on_confirm: Callback<()>,
}

#[function_component]
pub fn GuessPanel(props: &GuessPanelProps) -> Html {
    let confirm_cb = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <div style="font-size:13px;">{ format!("Where is {}?", props.landmark_name) }</div>
        { if props.coords_text.is_empty() { html!{ <div style="font-size:11px; opacity:0.7;">{"Tap the map to place your marker"}</div> } } else { html!{ <div style="font-size:11px; opacity:0.7; font-family:monospace;">{ props.coords_text.clone() }</div> } } }
        { if props.can_confirm { html!{ <button onclick={confirm_cb}>{"Confirm"}</button> } } else { html!{} } }
    </div>}
}
