use log::info;
use macroquad::{
    color::colors::{BLACK, DARKGRAY, WHITE},
    text::draw_text,
    time::get_frame_time,
    window::{Conf, clear_background, next_frame, screen_height, screen_width},
};

use common::{
    board::Board,
    player::{Color, Player},
    render::{Geometry, Renderer},
    sync::LocalStore,
};

use crate::{
    canvas::MacroquadCanvas,
    config::ClientSettings,
    error::ClientError,
    input::{self, Command},
    net::{Backend, RenetStore},
    session::GameSession,
};

/// Share of the shorter window side the board occupies.
pub const BOARD_FRACTION: f32 = 0.8;
const SOLO_ID: u64 = 0;
const FONT_SIZE: f32 = 24.0;

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Amaze".to_owned(),
        window_width: 800,
        window_height: 800,
        high_dpi: true,
        ..Default::default()
    }
}

pub async fn run(settings: ClientSettings) -> Result<(), ClientError> {
    let mut backend: Box<dyn Backend> = if settings.solo {
        info!("playing solo on a {0}x{0} board", settings.size);
        let board = Board::new(settings.size, settings.seed.clone())?;
        Box::new(LocalStore::new(board, SOLO_ID))
    } else {
        Box::new(RenetStore::connect(settings.server_address)?)
    };

    let color = settings.color.unwrap_or_else(Color::random);
    let mut session = GameSession::new(Player::new(settings.name.clone(), color), settings.draw_trail);
    session.start(backend.as_mut());

    loop {
        backend.pump()?;
        while let Some(event) = backend.poll_event() {
            session.handle_event(backend.as_mut(), event);
        }

        let mut leaving = false;
        for command in input::pressed_commands() {
            match command {
                Command::Move(direction) => {
                    session.handle_direction(backend.as_mut(), direction);
                }
                Command::Leave => leaving = true,
            }
        }
        if leaving {
            session.leave(backend.as_mut());
            backend.pump()?;
            backend.shutdown();
            return Ok(());
        }

        session.tick(get_frame_time());
        draw_frame(&session);
        next_frame().await;
    }
}

fn draw_frame(session: &GameSession) {
    let side = screen_width().min(screen_height()) * BOARD_FRACTION;
    let origin = glam::vec2(
        (screen_width() - side) / 2.0,
        (screen_height() - side) / 2.0,
    );

    let Some(maze) = session.maze() else {
        clear_background(WHITE);
        draw_text("Waiting for the board...", origin.x, origin.y, FONT_SIZE, BLACK);
        return;
    };

    let mut canvas = MacroquadCanvas::new(origin);
    let renderer = Renderer::new(Geometry::new(side, maze));
    let local = session.local();

    renderer.draw_maze(&mut canvas, maze);
    if session.draws_trail() {
        renderer.draw_trail(&mut canvas, session.trail(), local.color);
    }
    for remote in session.remotes() {
        renderer.draw_player(&mut canvas, remote.x, remote.y, remote.color);
    }
    renderer.draw_player(&mut canvas, local.x, local.y, local.color);

    let status = format!(
        "{} | {} other player(s)",
        local.label(),
        session.remotes().count()
    );
    draw_text(&status, origin.x, origin.y - 10.0, FONT_SIZE, DARKGRAY);
    if let Some(text) = session.notice() {
        draw_text(text, origin.x, origin.y + side + FONT_SIZE + 6.0, FONT_SIZE, BLACK);
    }
}
