pub const DEFAULT_SIZE: usize = 25;
pub const MAX_PLAYERS: usize = 16;
pub const MAX_NAME_LENGTH: usize = 16;
