mod api;
mod app;
mod attendance;
mod config;
mod money;
mod screens;
mod session;

use app::App;

fn main() -> iced::Result {
    env_logger::init();
    iced::application("Школьная платформа", App::update, App::view)
        .theme(|app: &App| app.theme.clone())
        .window_size(iced::Size::new(1400.0, 800.0))
        .run()
}
