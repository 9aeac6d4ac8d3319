use super::{landmark_view::LandmarkView, map_view::MapView};
use crate::levels::{Landmark, LevelCatalog};
use crate::util::clog;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Landmark,
    Map,
}

#[function_component(App)]
pub fn app() -> Html {
    let catalog = use_memo((), |_| {
        LevelCatalog::embedded().unwrap_or_else(|e| {
            clog(&format!("falling back to default level: {e}"));
            LevelCatalog::default()
        })
    });
    let view = use_state(|| View::Landmark);
    let landmark_idx = {
        let catalog = catalog.clone();
        use_state(move || catalog.pick(js_sys::Math::random()))
    };

    let to_map = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Map))
    };
    let play_again = {
        let view = view.clone();
        let landmark_idx = landmark_idx.clone();
        let catalog = catalog.clone();
        Callback::from(move |_| {
            landmark_idx.set(catalog.pick(js_sys::Math::random()));
            view.set(View::Landmark);
        })
    };

    let landmark = catalog
        .get(*landmark_idx)
        .cloned()
        .unwrap_or_else(Landmark::map_centre);
    match *view {
        View::Landmark => html! { <LandmarkView landmark={landmark} to_map={to_map} /> },
        View::Map => html! { <MapView
            map_image={catalog.map_image.clone()}
            landmark={landmark}
            play_again={play_again}
        /> },
    }
}
