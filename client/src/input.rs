use macroquad::input::{KeyCode, get_keys_pressed};

use common::movement::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Leave,
}

pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let direction = match key {
        KeyCode::Up | KeyCode::W => Direction::Up,
        KeyCode::Right | KeyCode::D => Direction::Right,
        KeyCode::Down | KeyCode::S => Direction::Down,
        KeyCode::Left | KeyCode::A => Direction::Left,
        KeyCode::Escape => return Some(Command::Leave),
        _ => return None,
    };
    Some(Command::Move(direction))
}

/// Commands for the keys pressed since the last frame.
pub fn pressed_commands() -> Vec<Command> {
    get_keys_pressed()
        .into_iter()
        .filter_map(command_for_key)
        .collect()
}
