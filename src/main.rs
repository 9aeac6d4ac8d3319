use landmark_guess::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
