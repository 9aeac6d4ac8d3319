use crate::util::format_countdown;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownDisplayProps {
    pub secs_left: u64,
    pub label: AttrValue,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let urgent = props.secs_left <= 3;
    let color = if urgent { "#f85149" } else { "#e6edf3" };
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; align-items:center; gap:4px;">
        <div style="font-size:12px; opacity:0.75;">{ props.label.clone() }</div>
        <div style={format!("font-size:28px; font-weight:600; color:{};", color)}>{ format_countdown(props.secs_left) }</div>
    </div>}
}
