use crate::action::Cursor;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

/// No mine may land within this distance of the first revealed tile.
pub const BOMB_MARGIN: u16 = 3;
/// Worst case tile count of the protected square, (2 * BOMB_MARGIN + 1)^2.
pub const MARGIN_AREA: u32 = 49;

pub const MIN_MINES: u32 = 1;

/// Scales the mine count between MIN_MINES and a third of the board.
pub fn mine_count(width: u16, height: u16, difficulty: u8) -> u32 {
    let area = width as u32 * height as u32;
    let capacity = area.saturating_sub(MARGIN_AREA);
    let max_mines = area / 3;
    // scaled in u64, max_mines * 100 does not fit u32 on the largest boards
    let scaled = max_mines.saturating_sub(MIN_MINES) as u64 * difficulty as u64 / 100;
    (MIN_MINES + scaled as u32).min(capacity)
}

pub struct Generator {
    rng: SmallRng,
}

impl Generator {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        log::info!("rng seed {seed}");
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Picks `count` distinct mine positions, none inside the margin around `safe`.
    pub fn mine_coords(
        &mut self,
        width: u16,
        height: u16,
        count: u32,
        safe: Cursor,
    ) -> Vec<Cursor> {
        let capacity = (width as u32 * height as u32).saturating_sub(MARGIN_AREA);
        let count = if count > capacity {
            log::warn!("mine count {count} exceeds capacity {capacity}, clamping");
            capacity
        } else {
            count
        };

        let mut taken = vec![false; width as usize * height as usize];
        let mut coords = Vec::with_capacity(count as usize);
        while (coords.len() as u32) < count {
            let x = self.rng.random_range(0..width);
            let y = self.rng.random_range(0..height);
            if x.abs_diff(safe.0) <= BOMB_MARGIN && y.abs_diff(safe.1) <= BOMB_MARGIN {
                continue;
            }
            let i = y as usize * width as usize + x as usize;
            if taken[i] {
                continue;
            }
            taken[i] = true;
            coords.push((x, y));
        }
        coords
    }
}
