use crate::action::Cursor;
use crate::error::{ConfigError, GameError};
use crate::generator::{self, Generator};
use crate::tile::Tile;
use crate::util::{DIRS_8, valid_neighbors, xy_i};
use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Display, Formatter};

pub const MIN_W: u16 = 10;
pub const MIN_H: u16 = 10;
pub const DEFAULT_W: u16 = 50;
pub const DEFAULT_H: u16 = 20;
pub const DEFAULT_DIFFICULTY: u8 = 35;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Active,
    Won,
    Lost,
}

impl Phase {
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every tile newly disclosed by this call, flood fill included.
    Opened(Vec<Cursor>),
    Exploded,
    /// Refused, the tile is flagged.
    Flagged,
    NoChange,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Toggled,
    Won,
    /// Refused, the tile is already revealed.
    Revealed,
}

/// The whole game state. Mines are placed on the first reveal, never inside
/// the margin around it, so the opening move cannot explode.
pub struct Board {
    width: u16,
    height: u16,
    difficulty: u8,
    reveal_around: bool,
    tiles: Vec<Tile>,
    phase: Phase,
    mines: u32,
    flags: u32,
    generator: Generator,
}

impl Board {
    pub fn new(
        width: u16,
        height: u16,
        difficulty: u8,
        reveal_around: bool,
        generator: Generator,
    ) -> Result<Self, ConfigError> {
        Self::validate(width, height, difficulty)?;
        Ok(Self {
            width,
            height,
            difficulty,
            reveal_around,
            tiles: vec![Tile::default(); width as usize * height as usize],
            phase: Phase::Empty,
            mines: generator::mine_count(width, height, difficulty),
            flags: 0,
            generator,
        })
    }

    fn validate(width: u16, height: u16, difficulty: u8) -> Result<(), ConfigError> {
        if width < MIN_W || height < MIN_H {
            return Err(ConfigError::TooSmall { width, height });
        }
        if difficulty == 0 || difficulty > 100 {
            return Err(ConfigError::Difficulty(difficulty));
        }
        Ok(())
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Placed (or, before the first reveal, planned) mines minus flags.
    /// Negative when the player has flagged more tiles than there are mines.
    pub fn mines_left(&self) -> i32 {
        self.mines as i32 - self.flags as i32
    }

    pub fn tile(&self, cursor: Cursor) -> Option<&Tile> {
        xy_i(cursor, self.width, self.height).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, cursor: Cursor) -> Option<&mut Tile> {
        xy_i(cursor, self.width, self.height).map(|i| &mut self.tiles[i])
    }

    /// Discloses a tile. On the first reveal of a game the mines are armed
    /// first, outside the margin around `cursor`. Revealing an already
    /// revealed number opens its unflagged neighbors once every adjacent
    /// mine is flagged.
    pub fn reveal(&mut self, cursor: Cursor) -> Result<RevealOutcome, GameError> {
        let i = xy_i(cursor, self.width, self.height)
            .ok_or(GameError::OutOfBounds(cursor.0, cursor.1))?;
        if self.phase.is_finished() {
            return Err(GameError::GameOver);
        }
        if self.tiles[i].flagged {
            return Ok(RevealOutcome::Flagged);
        }
        if self.phase == Phase::Empty {
            self.arm(cursor);
        }
        if self.tiles[i].revealed {
            return Ok(self.reveal_adjacent(cursor));
        }
        self.tiles[i].revealed = true;
        if self.tiles[i].mine {
            self.phase = Phase::Lost;
            log::info!("mine hit at ({}, {})", cursor.0, cursor.1);
            return Ok(RevealOutcome::Exploded);
        }
        let opened = self.flood(vec![cursor]);
        log::debug!("opened {} tiles\n{self}", opened.len());
        Ok(RevealOutcome::Opened(opened))
    }

    /// Flips the flag on a hidden tile. The game is won once every mine
    /// carries a flag, stray flags on safe tiles do not block the win.
    pub fn toggle_flag(&mut self, cursor: Cursor) -> Result<FlagOutcome, GameError> {
        let i = xy_i(cursor, self.width, self.height)
            .ok_or(GameError::OutOfBounds(cursor.0, cursor.1))?;
        if self.phase.is_finished() {
            return Err(GameError::GameOver);
        }
        let tile = &mut self.tiles[i];
        if tile.revealed {
            return Ok(FlagOutcome::Revealed);
        }
        tile.flagged = !tile.flagged;
        if tile.flagged {
            self.flags += 1;
        } else {
            self.flags -= 1;
        }
        if self.phase == Phase::Active && self.all_mines_flagged() {
            self.phase = Phase::Won;
            log::info!("all {} mines flagged", self.mines);
            return Ok(FlagOutcome::Won);
        }
        Ok(FlagOutcome::Toggled)
    }

    /// Discloses the whole grid for the end-of-game screen. Clears flags so
    /// every tile can show what it hid. Idempotent, a finished game keeps
    /// its verdict, giving up an unfinished one counts as a loss.
    pub fn reveal_all(&mut self) {
        for tile in &mut self.tiles {
            tile.revealed = true;
            tile.flagged = false;
        }
        self.flags = 0;
        if !self.phase.is_finished() {
            self.phase = Phase::Lost;
        }
    }

    /// Reinitializes in place, the tile allocation is reused when possible.
    pub fn reset(&mut self, width: u16, height: u16, difficulty: u8) -> Result<(), ConfigError> {
        Self::validate(width, height, difficulty)?;
        self.width = width;
        self.height = height;
        self.difficulty = difficulty;
        self.tiles.clear();
        self.tiles
            .resize(width as usize * height as usize, Tile::default());
        self.phase = Phase::Empty;
        self.mines = generator::mine_count(width, height, difficulty);
        self.flags = 0;
        Ok(())
    }

    pub fn restart(&mut self) {
        // current dimensions already passed validation
        let _ = self.reset(self.width, self.height, self.difficulty);
    }

    fn arm(&mut self, safe: Cursor) {
        let coords = self
            .generator
            .mine_coords(self.width, self.height, self.mines, safe);
        self.mines = coords.len() as u32;
        for &coord in &coords {
            self.place_mine(coord);
        }
        self.phase = Phase::Active;
        log::debug!(
            "armed {} mines, first reveal at ({}, {})",
            self.mines,
            safe.0,
            safe.1
        );
    }

    fn place_mine(&mut self, cursor: Cursor) {
        if let Some(tile) = self.tile_mut(cursor) {
            tile.mine = true;
        }
        let (w, h) = (self.width, self.height);
        for neighbor in valid_neighbors(&DIRS_8, cursor, w, h) {
            if let Some(tile) = self.tile_mut(neighbor) {
                tile.adjacent += 1;
            }
        }
    }

    /// Work-list flood fill. `opened` seeds the frontier with tiles that are
    /// already marked revealed; zero tiles spread to their hidden unflagged
    /// neighbors, numbers are disclosed but stop the spread.
    fn flood(&mut self, mut opened: Vec<Cursor>) -> Vec<Cursor> {
        let mut frontier: VecDeque<Cursor> = opened.iter().copied().collect();
        while let Some(cursor) = frontier.pop_front() {
            let Some(i) = xy_i(cursor, self.width, self.height) else {
                continue;
            };
            if self.tiles[i].adjacent != 0 {
                continue;
            }
            for neighbor in valid_neighbors(&DIRS_8, cursor, self.width, self.height) {
                let Some(j) = xy_i(neighbor, self.width, self.height) else {
                    continue;
                };
                let tile = &mut self.tiles[j];
                if tile.revealed || tile.flagged {
                    continue;
                }
                tile.revealed = true;
                opened.push(neighbor);
                frontier.push_back(neighbor);
            }
        }
        opened
    }

    fn reveal_adjacent(&mut self, cursor: Cursor) -> RevealOutcome {
        if !self.reveal_around {
            return RevealOutcome::NoChange;
        }
        let satisfied = valid_neighbors(&DIRS_8, cursor, self.width, self.height)
            .all(|n| self.tile(n).is_none_or(|t| !t.mine || t.flagged));
        if !satisfied {
            return RevealOutcome::NoChange;
        }
        let mut seeds = Vec::new();
        for neighbor in valid_neighbors(&DIRS_8, cursor, self.width, self.height) {
            if let Some(tile) = self.tile_mut(neighbor) {
                if !tile.revealed && !tile.flagged {
                    tile.revealed = true;
                    seeds.push(neighbor);
                }
            }
        }
        if seeds.is_empty() {
            return RevealOutcome::NoChange;
        }
        RevealOutcome::Opened(self.flood(seeds))
    }

    fn all_mines_flagged(&self) -> bool {
        self.tiles.iter().all(|t| !t.mine || t.flagged)
    }
}

/// ASCII dump of the player's view, one row per line.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks_exact(self.width as usize) {
            for tile in row {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
