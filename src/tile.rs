use std::fmt;
use std::fmt::{Display, Formatter, Write};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    pub adjacent: u8,
}

impl Tile {
    pub fn glyph(&self) -> char {
        if !self.revealed {
            if self.flagged { '!' } else { '#' }
        } else if self.mine {
            '*'
        } else if self.adjacent == 0 {
            '.'
        } else {
            std::char::from_digit(self.adjacent as u32, 10).unwrap()
        }
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_flagged_glyphs() {
        let tile = Tile::default();
        assert_eq!(tile.glyph(), '#');
        let flagged = Tile {
            flagged: true,
            ..Tile::default()
        };
        assert_eq!(flagged.glyph(), '!');
    }

    #[test]
    fn revealed_glyphs() {
        let blank = Tile {
            revealed: true,
            ..Tile::default()
        };
        assert_eq!(blank.glyph(), '.');
        let three = Tile {
            revealed: true,
            adjacent: 3,
            ..Tile::default()
        };
        assert_eq!(three.glyph(), '3');
        let mine = Tile {
            revealed: true,
            mine: true,
            ..Tile::default()
        };
        assert_eq!(mine.to_string(), "*");
    }
}
