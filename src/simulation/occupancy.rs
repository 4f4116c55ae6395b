//! Occupancy index - which cells hold a free atom
//!
//! A cell is flagged iff exactly one free atom lies on it. The index is
//! rebuilt from the atom list when a run starts and then updated in the same
//! step as every change to an atom's free-ness.
//!
//! Only flagged cells are stored, so the board dimension costs nothing.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::GridCoord;
use crate::entity::{Atom, AtomStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OccupancyRecord", into = "OccupancyRecord")]
pub struct Occupancy {
    dimension: u32,
    cells: AHashSet<GridCoord>,
}

/// Serialized form: flagged cells in row-major order
#[derive(Serialize, Deserialize)]
struct OccupancyRecord {
    dimension: u32,
    populated: Vec<GridCoord>,
}

impl From<Occupancy> for OccupancyRecord {
    fn from(occupancy: Occupancy) -> Self {
        Self {
            populated: occupancy.populated_cells().collect(),
            dimension: occupancy.dimension,
        }
    }
}

impl From<OccupancyRecord> for Occupancy {
    fn from(record: OccupancyRecord) -> Self {
        let mut occupancy = Occupancy::new(record.dimension);
        for cell in record.populated {
            occupancy.fill(cell);
        }
        occupancy
    }
}

impl Occupancy {
    /// All cells empty
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension,
            cells: AHashSet::new(),
        }
    }

    /// Replay atom positions: every free atom flags its cell
    pub fn rebuild(dimension: u32, atoms: &[Atom]) -> Self {
        let mut occupancy = Self::new(dimension);
        for atom in atoms.iter().filter(|a| a.status == AtomStatus::Free) {
            occupancy.fill(atom.position);
        }
        occupancy
    }

    #[inline]
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Off-board cells are never populated
    #[inline]
    pub fn is_populated(&self, cell: GridCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Off-board writes are ignored
    #[inline]
    pub fn fill(&mut self, cell: GridCoord) {
        if cell.in_bounds(self.dimension) {
            self.cells.insert(cell);
        }
    }

    #[inline]
    pub fn clear(&mut self, cell: GridCoord) {
        self.cells.remove(&cell);
    }

    /// Flagged cells in row-major order
    pub fn populated_cells(&self) -> impl Iterator<Item = GridCoord> {
        let mut cells: Vec<GridCoord> = self.cells.iter().copied().collect();
        cells.sort_unstable_by_key(|c| (c.y, c.x));
        cells.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AtomId, MechId};
    use crate::entity::AtomKind;

    #[test]
    fn test_rebuild_ignores_non_free_atoms() {
        let mut held = Atom::free(AtomId(1), AtomKind::Vanilla, GridCoord::new(1, 0));
        held.status = AtomStatus::Possessed;
        held.possessed_by = Some(MechId(0));
        let mut gone = Atom::free(AtomId(2), AtomKind::Vanilla, GridCoord::new(1, 1));
        gone.status = AtomStatus::Delivered;

        let atoms = vec![
            Atom::free(AtomId(0), AtomKind::Vanilla, GridCoord::new(0, 0)),
            held,
            gone,
        ];
        let occ = Occupancy::rebuild(2, &atoms);

        assert!(occ.is_populated(GridCoord::new(0, 0)));
        assert!(!occ.is_populated(GridCoord::new(1, 0)));
        assert!(!occ.is_populated(GridCoord::new(1, 1)));
        assert_eq!(occ.populated_cells().count(), 1);
    }

    #[test]
    fn test_off_board_is_empty_and_unwritable() {
        let mut occ = Occupancy::new(2);
        occ.fill(GridCoord::new(5, 5));
        occ.fill(GridCoord::new(-1, 0));
        assert!(!occ.is_populated(GridCoord::new(5, 5)));
        assert!(!occ.is_populated(GridCoord::new(-1, 0)));
        assert_eq!(occ.populated_cells().count(), 0);
    }

    #[test]
    fn test_fill_then_clear() {
        let mut occ = Occupancy::new(3);
        let cell = GridCoord::new(2, 1);
        occ.fill(cell);
        assert!(occ.is_populated(cell));
        occ.clear(cell);
        assert!(!occ.is_populated(cell));
    }

    #[test]
    fn test_huge_dimension_stays_sparse() {
        let mut occ = Occupancy::new(u32::MAX);
        let far = GridCoord::new(i32::MAX, i32::MAX);
        occ.fill(far);
        occ.fill(GridCoord::new(0, 0));
        assert!(occ.is_populated(far));
        assert_eq!(occ.dimension(), u32::MAX);
        assert_eq!(
            occ.populated_cells().collect::<Vec<_>>(),
            vec![GridCoord::new(0, 0), far]
        );
    }

    #[test]
    fn test_populated_cells_row_major() {
        let mut occ = Occupancy::new(4);
        for cell in [(3, 0), (0, 2), (1, 0), (2, 2)] {
            occ.fill(cell.into());
        }
        let order: Vec<_> = occ.populated_cells().map(|c| (c.x, c.y)).collect();
        assert_eq!(order, vec![(1, 0), (3, 0), (0, 2), (2, 2)]);
    }

    #[test]
    fn test_json_is_ordered_and_round_trips() {
        let mut a = Occupancy::new(4);
        let mut b = Occupancy::new(4);
        for cell in [(3, 3), (0, 1), (2, 0)] {
            a.fill(cell.into());
        }
        for cell in [(2, 0), (3, 3), (0, 1)] {
            b.fill(cell.into());
        }
        let json_a = serde_json::to_string(&a).unwrap();
        assert_eq!(json_a, serde_json::to_string(&b).unwrap());

        let back: Occupancy = serde_json::from_str(&json_a).unwrap();
        assert_eq!(back, a);
    }
}
