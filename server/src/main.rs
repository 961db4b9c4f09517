use std::{io, process};

use log::{error, info};

use common::{board::Board, config, net};
use server::{config::ServerSettings, run};

fn main() {
    config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("server forced to shut down");
        process::exit(0);
    }) {
        error!("failed to set Ctrl-C handler: {}", e);
        process::exit(1);
    }

    let settings = match ServerSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let board = match Board::new(settings.size, settings.seed) {
        Ok(board) => board,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let socket = match net::bind_socket(settings.address) {
        Ok(socket) => {
            info!("listening on {}", settings.address);
            socket
        }
        Err(e) => {
            error!("failed to bind socket: {}", e);
            if e.kind() == io::ErrorKind::AddrInUse {
                error!("is another instance of the server already running?");
            }
            process::exit(1);
        }
    };

    if let Err(e) = run::run_server(socket, settings.address, board) {
        error!("failed to start transport: {}", e);
        process::exit(1);
    }
}
