use serde::{Deserialize, Serialize};

// Each bit is one wall. A cell owns only its bottom and right edges; its top
// and left edges belong to the neighbours above and to the left.
pub const BOTTOM: u8 = 0b10;
pub const RIGHT: u8 = 0b01;
pub const WALLED: u8 = BOTTOM | RIGHT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Right,
}

impl Side {
    pub fn bit(self) -> u8 {
        match self {
            Side::Bottom => BOTTOM,
            Side::Right => RIGHT,
        }
    }
}

#[inline]
pub fn has_wall(cell: u8, side: Side) -> bool {
    cell & side.bit() != 0
}

/// Flips one wall bit. The generator clears each internal wall exactly once,
/// so a toggle never puts back a wall it already removed.
#[inline]
pub fn toggle_wall(cell: u8, side: Side) -> u8 {
    cell ^ side.bit()
}
