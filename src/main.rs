mod app;
mod config;
mod debug;
mod pilot;
mod render;
mod scene;
mod sim;

fn main() {
    env_logger::init();
    log::info!("Cellstorm starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
