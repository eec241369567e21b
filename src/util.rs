use crate::action::Cursor;

pub const DIRS_8: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Signed step for cursor movement, resizing and difficulty tweaks.
#[derive(Copy, Clone, Debug)]
pub enum Unit {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}

pub fn xy_i((x, y): Cursor, w: u16, h: u16) -> Option<usize> {
    if w <= x || h <= y {
        None
    } else {
        Some(y as usize * w as usize + x as usize)
    }
}

pub fn valid_neighbors(
    dirs: &[(i8, i8)],
    (x, y): Cursor,
    w: u16,
    h: u16,
) -> impl Iterator<Item = Cursor> {
    dirs.iter().filter_map(move |&(dx, dy)| {
        let i = x.checked_add_signed(dx as i16)?;
        let j = y.checked_add_signed(dy as i16)?;
        (w > i && h > j).then_some((i, j))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xy_i_maps_row_major() {
        assert_eq!(xy_i((0, 0), 8, 4), Some(0));
        assert_eq!(xy_i((3, 2), 8, 4), Some(19));
        assert_eq!(xy_i((8, 0), 8, 4), None);
        assert_eq!(xy_i((0, 4), 8, 4), None);
    }

    #[test]
    fn neighbors_clamp_to_bounds() {
        assert_eq!(valid_neighbors(&DIRS_8, (0, 0), 8, 4).count(), 3);
        assert_eq!(valid_neighbors(&DIRS_8, (3, 0), 8, 4).count(), 5);
        assert_eq!(valid_neighbors(&DIRS_8, (3, 2), 8, 4).count(), 8);
    }

    #[test]
    fn neighbors_of_far_corner_stay_inside() {
        let all: Vec<Cursor> = valid_neighbors(&DIRS_8, (7, 3), 8, 4).collect();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|&(x, y)| x < 8 && y < 4));
    }
}
