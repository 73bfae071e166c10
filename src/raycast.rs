use crate::world::Grid;

// Step sizes at or below this would never reach max range.
const MIN_STEP: f32 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    pub distance: f32,
    pub hit: bool,
    /// Last sampled `(row, col)`. For a boundary hit this lies outside the grid.
    pub cell: (i32, i32),
}

/// Unit direction for an angle. Heading 0 faces +Y.
#[inline]
pub fn direction(angle: f32) -> [f32; 2] {
    [angle.sin(), angle.cos()]
}

#[inline]
fn cell_at(origin: [f32; 2], dir: [f32; 2], distance: f32) -> (i32, i32) {
    let x = origin[0] + dir[0] * distance;
    let y = origin[1] + dir[1] * distance;
    (y.floor() as i32, x.floor() as i32)
}

/// Fixed-increment ray march.
///
/// Samples the cell under `origin + dir * i * step` for `i = 0, 1, ..` and stops
/// at the first solid cell, or reports a miss at `max_range`. The hit distance
/// overshoots the true wall boundary by less than one `step`.
pub fn cast(origin: [f32; 2], angle: f32, grid: &Grid, max_range: f32, step: f32) -> HitResult {
    let step = step.max(MIN_STEP);
    let dir = direction(angle);
    let steps = (max_range / step).ceil() as u32;

    let mut cell = cell_at(origin, dir, 0.0);
    for i in 0..=steps {
        // Multiply rather than accumulate so error does not build up along the ray
        let distance = i as f32 * step;
        if distance >= max_range {
            break;
        }
        cell = cell_at(origin, dir, distance);
        if grid.is_wall(cell.0, cell.1) {
            return HitResult {
                distance,
                hit: true,
                cell,
            };
        }
    }

    HitResult {
        distance: max_range.max(0.0),
        hit: false,
        cell,
    }
}

/// Exact grid traversal (DDA): steps from one grid-line crossing to the next and
/// returns the Euclidean distance to the boundary of the first solid cell.
pub fn cast_exact(origin: [f32; 2], angle: f32, grid: &Grid, max_range: f32) -> HitResult {
    let dir = direction(angle);
    let mut col = origin[0].floor() as i32;
    let mut row = origin[1].floor() as i32;

    if grid.is_wall(row, col) {
        return HitResult {
            distance: 0.0,
            hit: true,
            cell: (row, col),
        };
    }

    // Ray length needed to cross one full cell along each axis
    let delta_x = (1.0 / dir[0]).abs();
    let delta_y = (1.0 / dir[1]).abs();

    let (step_col, mut side_x) = if dir[0] == 0.0 {
        (0, f32::INFINITY)
    } else if dir[0] < 0.0 {
        (-1, (origin[0] - col as f32) * delta_x)
    } else {
        (1, (col as f32 + 1.0 - origin[0]) * delta_x)
    };
    let (step_row, mut side_y) = if dir[1] == 0.0 {
        (0, f32::INFINITY)
    } else if dir[1] < 0.0 {
        (-1, (origin[1] - row as f32) * delta_y)
    } else {
        (1, (row as f32 + 1.0 - origin[1]) * delta_y)
    };

    // Every iteration moves at least one cell, so leaving the grid is guaranteed
    loop {
        let distance = if side_x < side_y {
            let d = side_x;
            side_x += delta_x;
            col += step_col;
            d
        } else {
            let d = side_y;
            side_y += delta_y;
            row += step_row;
            d
        };

        if distance >= max_range {
            return HitResult {
                distance: max_range.max(0.0),
                hit: false,
                cell: (row, col),
            };
        }
        if grid.is_wall(row, col) {
            return HitResult {
                distance,
                hit: true,
                cell: (row, col),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const STEP: f32 = 0.1;
    const EPS: f32 = 1e-4;

    #[test]
    fn empty_grid_misses_at_max_range() {
        // Large enough that the edge is beyond max range from every origin tested
        let grid = Grid::open(128, 128).unwrap();
        for i in 0..16 {
            let angle = i as f32 * TAU / 16.0;
            for origin in [[64.0, 64.0], [63.3, 60.7], [70.5, 58.25]] {
                let r = cast(origin, angle, &grid, 50.0, STEP);
                assert!(!r.hit, "angle {angle} from {origin:?} hit {r:?}");
                assert_eq!(r.distance, 50.0);

                let e = cast_exact(origin, angle, &grid, 50.0);
                assert!(!e.hit);
                assert_eq!(e.distance, 50.0);
            }
        }
    }

    #[test]
    fn adjacent_wall_within_one_step() {
        let grid = Grid::demo_level();
        // Wall row 3 starts at y = 3.0, half a unit ahead
        let r = cast([7.5, 2.5], 0.0, &grid, 50.0, STEP);
        assert!(r.hit);
        assert_eq!(r.cell, (3, 7));
        assert!(r.distance >= 0.5 - EPS && r.distance <= 0.5 + STEP + EPS, "{r:?}");

        let e = cast_exact([7.5, 2.5], 0.0, &grid, 50.0);
        assert!(e.hit);
        assert_eq!(e.cell, (3, 7));
        assert!((e.distance - 0.5).abs() < EPS);
    }

    #[test]
    fn wall_approached_from_the_side() {
        let grid = Grid::demo_level();
        // Facing +X from (4.25, 3.5); the block's left face is at x = 6
        let r = cast([4.25, 3.5], FRAC_PI_2, &grid, 50.0, STEP);
        assert!(r.hit);
        assert_eq!(r.cell, (3, 6));
        assert!(r.distance >= 1.75 - EPS && r.distance <= 1.75 + STEP + EPS);

        let e = cast_exact([4.25, 3.5], FRAC_PI_2, &grid, 50.0);
        assert_eq!(e.cell, (3, 6));
        assert!((e.distance - 1.75).abs() < EPS);
    }

    #[test]
    fn boundary_stops_the_ray() {
        let grid = Grid::open_room();
        let r = cast([2.5, 2.5], PI, &grid, 20.0, STEP);
        assert!(r.hit);
        assert!(!grid.in_bounds(r.cell.0, r.cell.1));
        assert!(r.distance >= 2.5 - EPS && r.distance <= 2.5 + STEP + EPS);

        let e = cast_exact([2.5, 2.5], PI, &grid, 20.0);
        assert!(e.hit);
        assert_eq!(e.cell, (-1, 2));
        assert!((e.distance - 2.5).abs() < EPS);
    }

    #[test]
    fn origin_inside_wall_is_immediate_hit() {
        let grid = Grid::demo_level();
        let r = cast([7.5, 3.5], 1.0, &grid, 50.0, STEP);
        assert!(r.hit);
        assert_eq!(r.distance, 0.0);

        let e = cast_exact([7.5, 3.5], 1.0, &grid, 50.0);
        assert!(e.hit);
        assert_eq!(e.distance, 0.0);
    }

    #[test]
    fn short_range_reports_miss() {
        let grid = Grid::demo_level();
        let r = cast([7.5, 0.5], 0.0, &grid, 1.0, STEP);
        assert!(!r.hit);
        assert_eq!(r.distance, 1.0);

        let e = cast_exact([7.5, 0.5], 0.0, &grid, 1.0);
        assert!(!e.hit);
        assert_eq!(e.distance, 1.0);
    }

    #[test]
    fn fixed_step_tracks_exact_traversal() {
        let grid = Grid::demo_level();
        for i in 0..64 {
            let angle = i as f32 * TAU / 64.0 + 0.013;
            let origin = [2.5, 2.5];
            let r = cast(origin, angle, &grid, 50.0, STEP);
            let e = cast_exact(origin, angle, &grid, 50.0);
            assert_eq!(r.hit, e.hit);
            // Allow for a grazing sample through a cell corner
            assert!(
                r.distance - e.distance > -EPS && r.distance - e.distance < STEP + 0.05,
                "angle {angle}: fixed {} exact {}",
                r.distance,
                e.distance
            );
        }
    }

    #[test]
    fn degenerate_step_still_terminates() {
        let grid = Grid::open(4, 4).unwrap();
        let r = cast([2.0, 2.0], 0.0, &grid, 1.0, 0.0);
        assert!(!r.hit);
        assert_eq!(r.distance, 1.0);
    }
}
