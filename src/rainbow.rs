//! Rainbow colouring: assigning palette colours to grid cells, dots and ruled lines so that
//! neighbouring elements never share a colour.
//!
//! Both entry points take the random number generator as a parameter. Pass a seeded
//! [rand::rngs::StdRng] to get the same colouring every time:
//!
//! ```
//! use givesheet::rainbow::rainbow_grid;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let grid = rainbow_grid(&mut rng, 17, 24, 0.3, None).expect("valid grid");
//! assert_ne!(grid[(0, 0)], grid[(0, 1)]);
//! ```

use crate::colour::{colours, Colour};
use crate::PDFError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Index;

/// Fewest distinct colours a grid palette may have before the default palette is used instead
pub const MIN_GRID_SCHEME: usize = 5;

/// Fewest distinct colours a row palette may have before the default palette is used instead
pub const MIN_ROW_SCHEME: usize = 2;

/// A grid cell has at most this many already-coloured neighbours: above, before and the two
/// diagonals of the previous column
const MAX_GRID_NEIGHBOURS: usize = 4;

// every cell must keep at least one candidate colour
const _: () = assert!(MIN_GRID_SCHEME > MAX_GRID_NEIGHBOURS);

/// A set of distinct colours, already blended toward white
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    /// Build a palette from `scheme`, dropping repeated colours. If fewer than `minimum`
    /// distinct colours remain (or no scheme was given at all) the default palette is used.
    /// Every colour is then blended toward white by `lightness`, which must lie in [0, 1].
    pub fn new(
        scheme: Option<&[Colour]>,
        minimum: usize,
        lightness: f32,
    ) -> Result<Palette, PDFError> {
        if !(0.0..=1.0).contains(&lightness) {
            return Err(PDFError::LightnessOutOfRange(lightness));
        }

        let mut distinct: Vec<Colour> = Vec::new();
        for colour in scheme.unwrap_or_default() {
            if !distinct.contains(colour) {
                distinct.push(*colour);
            }
        }
        if distinct.len() < minimum {
            if scheme.is_some() {
                log::debug!(
                    "scheme has {} distinct colours, need {minimum}; using the default palette",
                    distinct.len()
                );
            }
            distinct = colours::DEFAULT_SCHEME.to_vec();
        }

        Ok(Palette {
            colours: distinct
                .into_iter()
                .map(|colour| colour.whiter(lightness))
                .collect(),
        })
    }

    /// Number of entries in the palette
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Whether the palette holds no colours
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// The blended colours, in palette order
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

/// The result of [rainbow_grid]: one colour per cell, addressed by `(x, y)`
#[derive(Debug, Clone, PartialEq)]
pub struct ColourGrid {
    width: usize,
    height: usize,
    // column-major, palette entry of every cell
    entries: Vec<usize>,
    palette: Palette,
}

impl ColourGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the grid was coloured from
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The index into [ColourGrid::palette] assigned to cell `(x, y)`
    pub fn entry(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.entries[x * self.height + y])
        } else {
            None
        }
    }

    /// The colour of cell `(x, y)`, if it is inside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        self.entry(x, y).map(|entry| self.palette.colours[entry])
    }

    /// Iterate over every cell as `(x, y, colour)`, column by column
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        self.entries.iter().enumerate().map(move |(i, &entry)| {
            (i / self.height, i % self.height, self.palette.colours[entry])
        })
    }
}

impl Index<(usize, usize)> for ColourGrid {
    type Output = Colour;

    fn index(&self, (x, y): (usize, usize)) -> &Colour {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) is outside a {}x{} grid",
            self.width,
            self.height
        );
        &self.palette.colours[self.entries[x * self.height + y]]
    }
}

/// Colour a `width` x `height` grid so that no cell shares a colour with the cell before it in
/// its column, nor with the three cells of the previous column that touch it.
///
/// Columns are filled in increasing `x`, cells within a column in increasing `y`. Each cell
/// picks uniformly among the palette entries its already-coloured neighbours left over.
/// `scheme` needs at least [MIN_GRID_SCHEME] distinct colours or the default palette is used.
pub fn rainbow_grid<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    lightness: f32,
    scheme: Option<&[Colour]>,
) -> Result<ColourGrid, PDFError> {
    if width == 0 || height == 0 {
        return Err(PDFError::InvalidDimensions { width, height });
    }
    let palette = Palette::new(scheme, MIN_GRID_SCHEME, lightness)?;
    log::trace!(
        "colouring {width}x{height} grid from {} colours",
        palette.len()
    );

    let at = |x: usize, y: usize| x * height + y;
    let mut entries: Vec<usize> = Vec::with_capacity(width * height);
    let mut candidates: Vec<usize> = Vec::with_capacity(palette.len());

    for x in 0..width {
        for y in 0..height {
            let mut neighbours: [Option<usize>; MAX_GRID_NEIGHBOURS] = [None; MAX_GRID_NEIGHBOURS];
            if x > 0 {
                neighbours[0] = Some(entries[at(x - 1, y)]);
                if y > 0 {
                    neighbours[2] = Some(entries[at(x - 1, y - 1)]);
                }
                if y + 1 < height {
                    neighbours[3] = Some(entries[at(x - 1, y + 1)]);
                }
            }
            if y > 0 {
                neighbours[1] = Some(entries[at(x, y - 1)]);
            }

            candidates.clear();
            candidates.extend(
                (0..palette.len()).filter(|entry| !neighbours.contains(&Some(*entry))),
            );
            let chosen = *candidates
                .choose(rng)
                .ok_or(PDFError::PaletteExhausted { x, y })?;
            entries.push(chosen);
        }
    }

    Ok(ColourGrid {
        width,
        height,
        entries,
        palette,
    })
}

/// Colour `length` positions in a row so that no colour repeats until the palette has been
/// used up, at which point a fresh cycle starts that never opens with the colour just placed.
///
/// `scheme` needs at least [MIN_ROW_SCHEME] distinct colours or the default palette is used.
pub fn rainbow_row<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    lightness: f32,
    scheme: Option<&[Colour]>,
) -> Result<Vec<Colour>, PDFError> {
    let palette = Palette::new(scheme, MIN_ROW_SCHEME, lightness)?;
    let all = 0..palette.len();

    let mut pool: Vec<usize> = all.clone().collect();
    let mut row: Vec<Colour> = Vec::with_capacity(length);
    for _ in 0..length {
        let entry = if pool.len() == 1 {
            let last = pool[0];
            pool = all.clone().filter(|&entry| entry != last).collect();
            last
        } else {
            let i = rng.gen_range(0..pool.len());
            pool.swap_remove(i)
        };
        row.push(palette.colours[entry]);
    }

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scheme() -> Vec<Colour> {
        (0..5u8).map(|i| Colour::new_rgb_bytes(i * 50, 0, 0)).collect()
    }

    #[test]
    fn palette_collapses_duplicates_before_counting() {
        let mut repeated = scheme();
        repeated.truncate(4);
        repeated.push(repeated[0]);
        let palette = Palette::new(Some(&repeated), MIN_GRID_SCHEME, 0.0).unwrap();
        assert_eq!(palette.colours(), &colours::DEFAULT_SCHEME[..]);

        let palette = Palette::new(Some(&repeated), MIN_ROW_SCHEME, 0.0).unwrap();
        assert_eq!(palette.len(), 4);
    }

    #[test]
    fn palette_rejects_lightness_outside_unit_range() {
        for lightness in [-0.1, 1.5, f32::NAN] {
            assert!(matches!(
                Palette::new(None, MIN_GRID_SCHEME, lightness),
                Err(PDFError::LightnessOutOfRange(_))
            ));
        }
    }

    #[test]
    fn grid_rejects_empty_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            rainbow_grid(&mut rng, 0, 3, 0.0, None),
            Err(PDFError::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
        assert!(rainbow_grid(&mut rng, 3, 0, 0.0, None).is_err());
    }

    #[test]
    fn single_cell_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = rainbow_grid(&mut rng, 1, 1, 0.0, Some(&scheme())).unwrap();
        assert!(scheme().contains(&grid[(0, 0)]));
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.iter().count(), 1);
    }

    #[test]
    fn grid_iterates_column_by_column() {
        let mut rng = StdRng::seed_from_u64(2);
        let grid = rainbow_grid(&mut rng, 3, 2, 0.0, None).unwrap();
        let coords: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
        for (x, y, colour) in grid.iter() {
            assert_eq!(grid[(x, y)], colour);
        }
    }

    #[test]
    fn fully_white_grid_still_alternates_entries() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = rainbow_grid(&mut rng, 4, 4, 1.0, None).unwrap();
        assert!(grid.iter().all(|(_, _, colour)| colour.is_white()));
        for x in 0..4 {
            for y in 1..4 {
                assert_ne!(grid.entry(x, y), grid.entry(x, y - 1));
            }
        }
    }

    #[test]
    fn empty_row() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(rainbow_row(&mut rng, 0, 0.5, None).unwrap().is_empty());
    }

    #[test]
    fn row_uses_whole_palette_before_repeating() {
        let mut rng = StdRng::seed_from_u64(5);
        let colours = scheme();
        let row = rainbow_row(&mut rng, colours.len(), 0.0, Some(&colours)).unwrap();
        for colour in colours.iter() {
            assert_eq!(row.iter().filter(|c| *c == colour).count(), 1);
        }
    }
}
