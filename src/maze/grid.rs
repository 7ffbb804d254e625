/// Flat column-major storage for a `width x height` grid, indexed by `(col, row)`.
pub struct Grid<T> {
    data: Box<[T]>,
    width: u16,
    height: u16,
}

impl<T> Grid<T> {
    /// Builds the grid by calling `init` once per coordinate, column by column.
    pub fn from_fn(width: u16, height: u16, mut init: impl FnMut(u16, u16) -> T) -> Self {
        let data = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .map(|(x, y)| init(x, y))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_in_bounds(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        x as usize * self.height as usize + y as usize
    }

    /// All coordinates in storage order (column-major).
    pub fn coords(&self) -> impl Iterator<Item = (u16, u16)> + use<T> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: u16, height: u16, value: T) -> Self {
        Grid {
            data: vec![value; width as usize * height as usize].into_boxed_slice(),
            width,
            height,
        }
    }
}

impl<T> std::ops::Index<(u16, u16)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<(u16, u16)> for Grid<T> {
    fn index_mut(&mut self, index: (u16, u16)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::filled(3, 2, 0u32);
        grid[(2, 1)] = 7;
        assert_eq!(grid[(2, 1)], 7);
        assert_eq!(grid.iter().filter(|&&v| v == 7).count(), 1);
    }

    #[test]
    fn test_from_fn_is_column_major() {
        let grid = Grid::from_fn(2, 3, |x, y| (x, y));
        let coords = grid.coords().collect::<Vec<_>>();
        assert_eq!(
            coords,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        for coord in coords {
            assert_eq!(grid[coord], coord);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::filled(5, 4, ());
        assert!(!grid.is_in_bounds((5, 0)));
        assert!(!grid.is_in_bounds((0, 4)));
        assert!(grid.is_in_bounds((4, 3)));
    }
}
