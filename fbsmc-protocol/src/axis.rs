//! Axis letters and rotation direction

/// Number of independently driven axes on the board
pub const AXIS_COUNT: usize = 4;

/// One of the four step/direction output pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    A,
    B,
    C,
    D,
}

impl Axis {
    /// All axes in output order
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::A, Axis::B, Axis::C, Axis::D];

    /// Zero-based index into per-axis arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a protocol letter, case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Axis::A),
            'B' => Some(Axis::B),
            'C' => Some(Axis::C),
            'D' => Some(Axis::D),
            _ => None,
        }
    }

    /// Upper-case protocol letter
    pub const fn letter(self) -> char {
        match self {
            Axis::A => 'A',
            Axis::B => 'B',
            Axis::C => 'C',
            Axis::D => 'D',
        }
    }
}

/// Rotation direction, as driven on the direction pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive step count, direction pin high
    #[default]
    Forward,
    /// Negative step count (`-` prefix), direction pin low
    Reverse,
}

impl Direction {
    /// Check if this is the forward direction
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }
}
