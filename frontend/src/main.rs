use crate::app::App;

mod app;
mod components;
mod config;
mod logging;
mod transport;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
