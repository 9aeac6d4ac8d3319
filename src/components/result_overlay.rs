use crate::scoring::ScoreReport;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultOverlayProps {
    pub report: Option<ScoreReport>,
    pub landmark_name: AttrValue,
    pub play_again: Callback<()>,
}

#[function_component]
pub fn ResultOverlay(props: &ResultOverlayProps) -> Html {
    let Some(report) = props.report else {
        return html! {};
    };
    let again_btn = {
        let cb = props.play_again.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; left:50%; bottom:24px; transform:translateX(-50%); background:rgba(0,0,0,0.85); border:2px solid #58a6ff; padding:16px 28px; border-radius:12px; text-align:center; min-width:280px;">
            <h2 style="margin:0 0 8px 0; color:#58a6ff;">{ report.verdict() }</h2>
            <p style="margin:4px 0;">{ props.landmark_name.clone() }</p>
            <p style="margin:4px 0;">{ format!("Score: {}", report.score) }</p>
            <p style="margin:4px 0; opacity:0.75;">{ format!("Off by {:.0} px", report.distance) }</p>
            <div style="margin-top:12px;">
                <button onclick={again_btn}>{"Play again"}</button>
            </div>
        </div>
    }
}
