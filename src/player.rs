use std::f32::consts::TAU;

use crate::input::{KeyState, LogicalKey};
use crate::raycast::direction;
use crate::world::Grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: [f32; 2], // (x, y) in grid units; x is the column axis
    pub heading: f32,  // radians in [0, 2π), 0 faces +Y
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: [2.5, 2.5],
            heading: 0.0,
        }
    }
}

/// Wrap any angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

pub struct Player {
    pose: Pose,
    move_speed: f32,
    rotation_speed: f32,
}

impl Player {
    pub fn new(pose: Pose, move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            pose: Pose {
                heading: normalize_angle(pose.heading),
                ..pose
            },
            move_speed,
            rotation_speed,
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Step along the heading. The move is dropped if the target point leaves
    /// the grid or lands in a wall cell. Returns whether it was applied.
    pub fn move_by(&mut self, distance: f32, grid: &Grid) -> bool {
        let dir = direction(self.pose.heading);
        let x = self.pose.pos[0] + dir[0] * distance;
        let y = self.pose.pos[1] + dir[1] * distance;

        if !grid.contains_point(x, y) || grid.is_wall_at(x, y) {
            log::trace!("move to ({x:.3}, {y:.3}) blocked");
            return false;
        }
        self.pose.pos = [x, y];
        true
    }

    pub fn rotate(&mut self, delta: f32) {
        self.pose.heading = normalize_angle(self.pose.heading + delta);
    }

    /// Apply one frame of input. Held keys stack within the frame.
    pub fn update(&mut self, keys: &KeyState, grid: &Grid) {
        if keys.is_down(LogicalKey::Forward) {
            self.move_by(self.move_speed, grid);
        }
        if keys.is_down(LogicalKey::Backward) {
            self.move_by(-self.move_speed, grid);
        }
        if keys.is_down(LogicalKey::TurnLeft) {
            self.rotate(-self.rotation_speed);
        }
        if keys.is_down(LogicalKey::TurnRight) {
            self.rotate(self.rotation_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-4;

    fn player_at(x: f32, y: f32, heading: f32) -> Player {
        Player::new(
            Pose {
                pos: [x, y],
                heading,
            },
            0.1,
            0.05,
        )
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn three_steps_forward() {
        let grid = Grid::demo_level();
        let mut p = player_at(2.5, 2.5, 0.0);
        for _ in 0..3 {
            assert!(p.move_by(0.1, &grid));
        }
        let pos = p.pose().pos;
        assert!((pos[0] - 2.5).abs() < EPS);
        assert!((pos[1] - 2.8).abs() < EPS);
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let grid = Grid::demo_level();
        let mut p = player_at(6.5, 2.75, 0.0);
        assert!(p.move_by(0.1, &grid));
        assert!(p.move_by(0.1, &grid));
        let before = p.pose();
        // Next step lands at y = 3.05, inside wall row 3
        assert!(!p.move_by(0.1, &grid));
        assert_eq!(p.pose(), before);
    }

    #[test]
    fn move_out_of_bounds_is_rejected() {
        for (rows, cols) in [(1, 1), (2, 3), (10, 17)] {
            let grid = Grid::open(rows, cols).unwrap();
            let mut p = player_at(0.5, 0.5, PI);
            assert!(!p.move_by(0.6, &grid));
            assert_eq!(p.pose().pos, [0.5, 0.5]);

            let mut p = player_at(0.5, 0.5, 3.0 * FRAC_PI_2);
            assert!(!p.move_by(0.6, &grid));
            assert_eq!(p.pose().pos, [0.5, 0.5]);
        }
    }

    #[test]
    fn backward_moves_against_heading() {
        let grid = Grid::open_room();
        let mut p = player_at(2.5, 2.5, FRAC_PI_2);
        assert!(p.move_by(-1.0, &grid));
        assert!((p.pose().pos[0] - 1.5).abs() < EPS);
        assert!((p.pose().pos[1] - 2.5).abs() < EPS);
    }

    #[test]
    fn rotate_stays_in_range() {
        let mut p = player_at(1.0, 1.0, 0.0);
        p.rotate(-0.05);
        assert!((p.pose().heading - (TAU - 0.05)).abs() < EPS);
        p.rotate(0.1);
        assert!((p.pose().heading - 0.05).abs() < EPS);
        p.rotate(100.0);
        assert!((0.0..TAU).contains(&p.pose().heading));
        p.rotate(-1e-9);
        assert!((0.0..TAU).contains(&p.pose().heading));
    }

    #[test]
    fn repeated_rotation_matches_single_rotation() {
        for &d in &[0.05_f32, -0.05, 0.7, -2.3, 5.0, 13.0] {
            for n in [1_u32, 3, 17, 100] {
                let mut stepped = player_at(1.0, 1.0, 0.0);
                for _ in 0..n {
                    stepped.rotate(d);
                }
                let mut once = player_at(1.0, 1.0, 0.0);
                once.rotate(n as f32 * d);

                let diff = angle_diff(stepped.pose().heading, once.pose().heading);
                assert!(diff < 1e-3, "d={d} n={n} diff={diff}");
            }
        }
    }

    #[test]
    fn held_keys_apply_together() {
        let grid = Grid::demo_level();
        let mut p = player_at(2.5, 2.5, 0.0);
        let mut keys = KeyState::default();
        keys.set(LogicalKey::Forward, true);
        keys.set(LogicalKey::TurnLeft, true);
        p.update(&keys, &grid);

        // Movement uses the heading from before this frame's rotation
        assert!((p.pose().pos[1] - 2.6).abs() < EPS);
        assert!((p.pose().heading - (TAU - 0.05)).abs() < EPS);
    }

    #[test]
    fn opposite_keys_cancel() {
        let grid = Grid::demo_level();
        let mut p = player_at(2.5, 2.5, 1.0);
        let mut keys = KeyState::default();
        for k in LogicalKey::ALL {
            keys.set(k, true);
        }
        p.update(&keys, &grid);
        assert!((p.pose().pos[0] - 2.5).abs() < EPS);
        assert!((p.pose().pos[1] - 2.5).abs() < EPS);
        assert!((p.pose().heading - 1.0).abs() < EPS);
    }
}
