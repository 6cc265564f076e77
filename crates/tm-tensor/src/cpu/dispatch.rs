//! Hierarchical parallel-for over a [`TileGrid`].
//!
//! `parallel_for_work_group` runs one task per tile and each tile can run
//! one task per element through [`WorkGroup::parallel_for_work_item`]. Both
//! levels are rayon parallel iterators, so tiles and the elements inside a
//! tile execute in no particular order. Each call returns only after every
//! task it spawned has finished.
//!
//! The output buffer is split into disjoint per-row slices before dispatch,
//! so each work-item receives exclusive `&mut` access to exactly one cell.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::grid::{LocalCoord, TileCoord, TileGrid};

/// One tile of the output, handed to a work-group task.
#[derive(Debug)]
pub struct WorkGroup<'a> {
    id: TileCoord,
    grid: TileGrid,
    rows: Vec<&'a mut [f32]>,
}

/// One output cell, handed to a work-item task.
#[derive(Debug)]
pub struct WorkItem<'a> {
    group: TileCoord,
    local: LocalCoord,
    grid: TileGrid,
    cell: &'a mut f32,
}

/// Runs `f` once per tile of `grid` over the row-major `out` buffer.
///
/// # Panics
/// Panics if `out.len() != grid.dim() * grid.dim()`.
pub fn parallel_for_work_group<F>(grid: &TileGrid, out: &mut [f32], f: F)
where
    F: Fn(WorkGroup<'_>) + Sync + Send,
{
    let n = grid.dim();
    assert_eq!(
        out.len(),
        n * n,
        "output length {} does not match {}x{} grid",
        out.len(),
        n,
        n
    );
    if out.is_empty() {
        return;
    }

    let grid = *grid;
    let block = grid.block();
    let side = grid.tiles_per_side();
    debug!(%grid, tiles = grid.num_tiles(), "dispatching work-groups");

    // Each band of `block` rows holds one row of tiles.
    out.par_chunks_mut(block * n)
        .enumerate()
        .for_each(|(tile_row, band)| {
            let mut tiles: Vec<Vec<&mut [f32]>> =
                (0..side).map(|_| Vec::with_capacity(block)).collect();
            // Row segments arrive as (row 0: tile 0, tile 1, ...), (row 1: ...).
            for (i, segment) in band.chunks_mut(block).enumerate() {
                tiles[i % side].push(segment);
            }

            tiles
                .into_par_iter()
                .enumerate()
                .for_each(|(tile_col, rows)| {
                    let id = TileCoord {
                        row: tile_row,
                        col: tile_col,
                    };
                    trace!(tile_row, tile_col, "work-group start");
                    f(WorkGroup { id, grid, rows });
                });
        });
}

impl<'a> WorkGroup<'a> {
    /// Coordinate of this tile in the grid.
    pub fn id(&self) -> TileCoord {
        self.id
    }

    /// Tile side length.
    pub fn block(&self) -> usize {
        self.grid.block()
    }

    /// Runs `f` once per element of this tile.
    pub fn parallel_for_work_item<F>(self, f: F)
    where
        F: Fn(WorkItem<'_>) + Sync + Send,
    {
        let group = self.id;
        let grid = self.grid;
        self.rows
            .into_par_iter()
            .enumerate()
            .for_each(|(local_row, row)| {
                row.par_iter_mut()
                    .enumerate()
                    .for_each(|(local_col, cell)| {
                        f(WorkItem {
                            group,
                            local: LocalCoord {
                                row: local_row,
                                col: local_col,
                            },
                            grid,
                            cell,
                        })
                    });
            });
    }
}

impl<'a> WorkItem<'a> {
    /// Coordinate of the enclosing tile.
    pub fn group(&self) -> TileCoord {
        self.group
    }

    /// Coordinate within the enclosing tile.
    pub fn local(&self) -> LocalCoord {
        self.local
    }

    /// Global (row, col) of the cell this item owns.
    pub fn global(&self) -> (usize, usize) {
        self.grid.global(self.group, self.local)
    }

    /// The output cell owned by this item.
    pub fn cell(&mut self) -> &mut f32 {
        &mut *self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_cell_visited_once() {
        let grid = TileGrid::new(12, 3).unwrap();
        let mut out = vec![0.0f32; 144];
        parallel_for_work_group(&grid, &mut out, |group| {
            group.parallel_for_work_item(|mut item| {
                *item.cell() += 1.0;
            });
        });
        assert!(out.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_global_coordinates_match_cells() {
        let grid = TileGrid::new(8, 4).unwrap();
        let mut out = vec![0.0f32; 64];
        parallel_for_work_group(&grid, &mut out, |group| {
            group.parallel_for_work_item(|mut item| {
                let (row, col) = item.global();
                *item.cell() = (row * 8 + col) as f32;
            });
        });
        let expected: Vec<f32> = (0..64).map(|i| i as f32).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_item_knows_its_tile() {
        let grid = TileGrid::new(6, 2).unwrap();
        let mut out = vec![0.0f32; 36];
        parallel_for_work_group(&grid, &mut out, |group| {
            let id = group.id();
            group.parallel_for_work_item(|mut item| {
                assert_eq!(item.group(), id);
                assert!(item.local().row < 2 && item.local().col < 2);
                *item.cell() = (id.row * 3 + id.col) as f32;
            });
        });
        // Cell (3, 5) sits in tile (1, 2).
        assert_eq!(out[3 * 6 + 5], 5.0);
        // Cell (0, 1) sits in tile (0, 0).
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_group_and_item_counts() {
        let grid = TileGrid::new(16, 4).unwrap();
        let groups = AtomicUsize::new(0);
        let items = AtomicUsize::new(0);
        let mut out = vec![0.0f32; 256];
        parallel_for_work_group(&grid, &mut out, |group| {
            groups.fetch_add(1, Ordering::Relaxed);
            assert_eq!(group.block(), 4);
            group.parallel_for_work_item(|_| {
                items.fetch_add(1, Ordering::Relaxed);
            });
        });
        assert_eq!(groups.load(Ordering::Relaxed), 16);
        assert_eq!(items.load(Ordering::Relaxed), 256);
    }

    #[test]
    fn test_unit_and_whole_tiles() {
        for block in [1, 5] {
            let grid = TileGrid::new(5, block).unwrap();
            let mut out = vec![0.0f32; 25];
            parallel_for_work_group(&grid, &mut out, |group| {
                group.parallel_for_work_item(|mut item| *item.cell() += 1.0);
            });
            assert!(out.iter().all(|&v| v == 1.0), "block {}", block);
        }
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let grid = TileGrid::new(0, 4).unwrap();
        let mut out: Vec<f32> = vec![];
        parallel_for_work_group(&grid, &mut out, |_| panic!("no tiles expected"));
    }

    #[test]
    #[should_panic]
    fn test_wrong_output_length_panics() {
        let grid = TileGrid::new(4, 2).unwrap();
        let mut out = vec![0.0f32; 15];
        parallel_for_work_group(&grid, &mut out, |_| {});
    }
}
