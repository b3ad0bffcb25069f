use std::ops::{Index, IndexMut};

use crate::position::Position;

/// Row-major `rows`×`columns` storage. Indexing outside the grid panics; callers check with
/// [`Grid::contains`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: u8,
    columns: u8,
    cells: Box<[T]>,
}
impl<T> Grid<T> {
    pub fn new(rows: u8, columns: u8) -> Self
    where
        T: Default + Clone,
    {
        Grid {
            rows,
            columns,
            cells: vec![T::default(); rows as usize * columns as usize].into_boxed_slice(),
        }
    }
    pub fn rows(&self) -> u8 {
        self.rows
    }
    pub fn columns(&self) -> u8 {
        self.columns
    }
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }
    pub fn row(&self, row: u8) -> &[T] {
        let start = row as usize * self.columns as usize;
        &self.cells[start..start + self.columns as usize]
    }
    pub fn positioned_values(&self) -> impl Iterator<Item = (Position, &T)> {
        (0..self.rows).flat_map(move |row| {
            (0..)
                .zip(self.row(row))
                .map(move |(column, item)| (Position { row, column }, item))
        })
    }
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.iter().map(&mut f).collect(),
        }
    }
    fn offset(&self, position: Position) -> usize {
        assert!(
            self.contains(position),
            "{position} is outside of a {}x{} grid",
            self.rows,
            self.columns
        );
        position.row as usize * self.columns as usize + position.column as usize
    }
}
impl Grid<bool> {
    pub fn any(&self) -> bool {
        self.cells.iter().any(|cell| *cell)
    }
    pub fn marked(&self) -> impl Iterator<Item = Position> {
        self.positioned_values()
            .filter(|(_, cell)| **cell)
            .map(|(position, _)| position)
    }
}
impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[self.offset(index)]
    }
}
impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }
}
