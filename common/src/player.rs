use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    constants::MAX_NAME_LENGTH,
    maze::Maze,
    movement::{self, Direction},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(rng.random(), rng.random(), rng.random())
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub name: Option<String>,
    pub color: Color,
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(name: Option<String>, color: Color) -> Self {
        Self {
            name,
            color,
            x: 0,
            y: 0,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, (x, y): (usize, usize)) {
        self.x = x;
        self.y = y;
    }

    pub fn reset(&mut self) {
        self.set_position((0, 0));
    }

    /// Moves one cell if the maze allows it. Returns whether the player moved.
    pub fn attempt_move(&mut self, maze: &Maze, direction: Direction) -> bool {
        match movement::try_move(maze, self.x, self.y, direction) {
            Some(position) => {
                self.set_position(position);
                true
            }
            None => false,
        }
    }

    pub fn has_won(&self, size: usize) -> bool {
        movement::is_winning_position(size, self.x, self.y)
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}

/// Trims and bounds a display name; control characters are dropped. An empty
/// result means the player stays anonymous.
pub fn sanitize_name(input: &str) -> Option<String> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LENGTH)
        .collect();
    let cleaned = cleaned.trim_end().to_string();

    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    #[test]
    fn hex_round_trips_through_display() {
        let color = Color::new(0x1A, 0x2B, 0xFF);
        assert_eq!(color.to_hex(), "#1A2BFF");
        assert_eq!(Color::from_hex("#1a2bff"), Some(color));
        assert_eq!(Color::from_hex("1A2BFF"), Some(color));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn rejected_moves_leave_the_player_in_place() {
        let maze = Maze::new(3, &Seed::from(42)).unwrap();
        let mut player = Player::new(None, Color::BLACK);

        assert!(!player.attempt_move(&maze, Direction::Up));
        assert!(!player.attempt_move(&maze, Direction::Down));
        assert_eq!(player.position(), (0, 0));

        assert!(player.attempt_move(&maze, Direction::Right));
        assert_eq!(player.position(), (1, 0));
    }

    #[test]
    fn walking_the_fixture_reaches_the_goal() {
        let maze = Maze::new(3, &Seed::from(42)).unwrap();
        let mut player = Player::new(Some("ann".to_string()), Color::BLACK);

        for direction in [Direction::Right, Direction::Down, Direction::Right] {
            assert!(player.attempt_move(&maze, direction), "{direction:?}");
            assert!(!player.has_won(3));
        }
        assert!(player.attempt_move(&maze, Direction::Down));
        assert!(player.has_won(3));
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(sanitize_name("  Ann  "), Some("Ann".to_string()));
        assert_eq!(sanitize_name("   "), None);
        assert_eq!(sanitize_name("a\u{7}b"), Some("ab".to_string()));
        let long = "x".repeat(MAX_NAME_LENGTH + 5);
        assert_eq!(sanitize_name(&long).map(|n| n.len()), Some(MAX_NAME_LENGTH));
    }
}
