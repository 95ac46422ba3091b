use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A cell of the 8x8 board. Rank 0 is White's home rank ("1"), file 0 is the
/// a-file. Off-board coordinates are never representable: every constructor
/// bounds-checks and hands back `None` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: i32, file: i32) -> Option<Square> {
        if Self::in_bounds(rank, file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    pub fn in_bounds(rank: i32, file: i32) -> bool {
        (0..8).contains(&rank) && (0..8).contains(&file)
    }

    pub fn rank(self) -> usize {
        self.rank as usize
    }

    pub fn file(self) -> usize {
        self.file as usize
    }

    /// The square `dr` ranks and `df` files away, if it is still on the board.
    pub fn offset(self, dr: i32, df: i32) -> Option<Square> {
        Square::new(self.rank as i32 + dr, self.file as i32 + df)
    }

    /// Same rank, different file.
    pub fn with_file(self, file: i32) -> Option<Square> {
        Square::new(self.rank as i32, file)
    }

    /// All 64 squares, rank by rank starting from a1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { rank, file }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase() as i32 - b'a' as i32;
        let rank = bytes[1] as i32 - b'1' as i32;
        Square::new(rank, file).ok_or_else(|| Error::InvalidSquare(s.to_string()))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
