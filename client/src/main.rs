use std::process;

use log::error;
use macroquad::window::Conf;

use client::{config::ClientSettings, run};
use common::config;

fn window_conf() -> Conf {
    run::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match ClientSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run::run(settings).await {
        error!("{}", e);
        process::exit(1);
    }
}
