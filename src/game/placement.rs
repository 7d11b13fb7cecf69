//! Random placement of food and obstacles on free grid cells.
//!
//! Both use plain rejection sampling: draw a uniform cell, retry while it is
//! taken. The grid is far larger than anything placed on it, so this settles
//! in a handful of draws. The attempt cap turns a nearly full board into an
//! error instead of a hang.

use std::collections::HashSet;

use anyhow::{Result, bail};
use rand::Rng;

use super::state::Position;

/// Sample a uniformly random cell of a `grid_size` x `grid_size` grid that is
/// not in `occupied`.
pub fn random_unoccupied_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    occupied: &HashSet<Position>,
    max_attempts: usize,
) -> Result<Position> {
    let size = grid_size as i32;
    let free = (grid_size * grid_size).saturating_sub(in_grid_count(occupied, size));
    if free == 0 {
        bail!(
            "no free cell left: the board is full ({0}x{0} grid, {1} cells taken)",
            grid_size,
            occupied.len()
        );
    }

    for _ in 0..max_attempts {
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.contains(&pos) {
            return Ok(pos);
        }
    }

    bail!(
        "no free cell found after {0} attempts: {1} of {2} cells on the {3}x{3} grid are free",
        max_attempts,
        free,
        grid_size * grid_size,
        grid_size
    )
}

/// Place `count` distinct obstacles, none of them on `reserved` cells
/// (the snake, and the food when it already exists).
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    count: usize,
    reserved: &[Position],
    max_attempts: usize,
) -> Result<Vec<Position>> {
    let mut occupied: HashSet<Position> = reserved.iter().copied().collect();
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let cell = random_unoccupied_cell(rng, grid_size, &occupied, max_attempts)?;
        occupied.insert(cell);
        obstacles.push(cell);
    }

    Ok(obstacles)
}

fn in_grid_count(occupied: &HashSet<Position>, size: i32) -> usize {
    occupied
        .iter()
        .filter(|p| p.x >= 0 && p.x < size && p.y >= 0 && p.y < size)
        .count()
}
