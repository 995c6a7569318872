//! Mask overlap detection and wall-bound resolution.
//!
//! Overlap between two bodies is pixel-accurate: bounding boxes give a cheap
//! rejection, then both opacity masks are sampled over exactly the
//! overlapping rectangle. Solid-on-solid overlap is cleared by displacing
//! the mover along the axis that needs the least movement, with per-column
//! and per-row collision counts standing in for true penetration depth.

use glam::IVec2;

use super::geom::Bounds;
use super::math::argmax;
use super::state::BodyCore;

/// Detect and resolve overlap between `mover` and `obstacle`.
///
/// Returns whether any opaque pixel of the two sprites coincides. When it
/// does and both bodies are solid, `mover.position` is corrected so the
/// bodies sit aligned but no longer overlapping; the return value reports
/// the collision either way.
pub fn resolve_overlap(mover: &mut BodyCore, obstacle: &BodyCore) -> bool {
    let mover_bounds = mover.bounds();
    let obstacle_bounds = obstacle.bounds();

    if !mover_bounds.intersects(&obstacle_bounds) {
        return false;
    }

    let overlap = Bounds::intersection(&mover_bounds, &obstacle_bounds);
    // Overlap rectangle origin in each sprite's local space.
    let mover_local = IVec2::new(overlap.x - mover_bounds.x, overlap.y - mover_bounds.y);
    let obstacle_local = IVec2::new(overlap.x - obstacle_bounds.x, overlap.y - obstacle_bounds.y);

    // Collision grid: a cell is set where both sprites are opaque.
    let mut grid = vec![false; (overlap.width * overlap.height) as usize];
    for row in 0..overlap.height {
        for col in 0..overlap.width {
            grid[(col + row * overlap.width) as usize] = mover
                .mask
                .opaque(mover_local.x + col, mover_local.y + row)
                && obstacle
                    .mask
                    .opaque(obstacle_local.x + col, obstacle_local.y + row);
        }
    }
    let collided = grid.iter().any(|&cell| cell);

    if collided && mover.solid && obstacle.solid {
        // Count colliding cells per column and per row; the maxima
        // approximate how far the mover must travel along each axis to
        // clear the overlap.
        let mut col_counts = vec![0i32; overlap.width as usize];
        let mut row_counts = vec![0i32; overlap.height as usize];
        for row in 0..overlap.height {
            for col in 0..overlap.width {
                if grid[(col + row * overlap.width) as usize] {
                    col_counts[col as usize] += 1;
                    row_counts[row as usize] += 1;
                }
            }
        }
        let Ok((col_max, _)) = argmax(&col_counts) else {
            return collided;
        };
        let Ok((row_max, _)) = argmax(&row_counts) else {
            return collided;
        };

        // Which obstacle edges the overlap rectangle sits on. More than one
        // can hold at once and each applies its own correction.
        let top_collision = obstacle_bounds.top() == overlap.top();
        let bottom_collision = obstacle_bounds.bottom() == overlap.bottom();
        let left_collision = obstacle_bounds.left() == overlap.left();
        let right_collision = obstacle_bounds.right() == overlap.right();

        // Correct along the cheaper axis; ties go horizontal.
        if col_max < row_max {
            if top_collision {
                mover.position -= IVec2::new(0, col_max);
            }
            if bottom_collision {
                mover.position += IVec2::new(0, col_max);
            }
        } else {
            if left_collision {
                mover.position -= IVec2::new(row_max, 0);
            }
            if right_collision {
                mover.position += IVec2::new(row_max, 0);
            }
        }

        log::debug!(
            "{} displaced off {} (col_max={col_max}, row_max={row_max})",
            mover.name,
            obstacle.name
        );
    }

    collided
}

/// Detect and resolve the body exceeding its room bounds.
///
/// The body is fully inside exactly when clipping its bounding box to the
/// room changes nothing; anything else pushes it back along each axis whose
/// room edge the clipped box sits on, and returns true.
pub fn resolve_walls(body: &mut BodyCore) -> bool {
    let bounds = body.bounds();
    let clipped = Bounds::intersection(&bounds, &body.room);

    if clipped == bounds {
        return false;
    }

    // Push-back distances come from the bounding box alone, not the mask.
    // Good enough for the convex sprites this engine moves.
    let col_max = bounds.width - clipped.width;
    let row_max = bounds.height - clipped.height;

    let top_collision = body.room.top() == clipped.top();
    let bottom_collision = body.room.bottom() == clipped.bottom();
    let left_collision = body.room.left() == clipped.left();
    let right_collision = body.room.right() == clipped.right();

    if top_collision {
        body.position += IVec2::new(0, row_max);
    }
    if bottom_collision {
        body.position -= IVec2::new(0, row_max);
    }
    if left_collision {
        body.position += IVec2::new(col_max, 0);
    }
    if right_collision {
        body.position -= IVec2::new(col_max, 0);
    }

    log::debug!("{} pushed back inside the room to {:?}", body.name, body.position);
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::super::mask::OpacityMask;
    use super::*;

    fn solid_body(name: &'static str, size: i32, position: IVec2) -> BodyCore {
        let room = Bounds::new(0, 0, 1000, 1000);
        BodyCore::new(name, Arc::new(OpacityMask::filled(size, size)), position, room)
    }

    #[test]
    fn test_disjoint_boxes_never_collide() {
        let mut mover = solid_body("mover", 10, IVec2::new(0, 0));
        let obstacle = solid_body("obstacle", 10, IVec2::new(20, 20));
        assert!(!resolve_overlap(&mut mover, &obstacle));
        assert_eq!(mover.position, IVec2::new(0, 0));
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let mut mover = solid_body("mover", 10, IVec2::new(10, 0));
        let obstacle = solid_body("obstacle", 10, IVec2::new(0, 0));
        assert!(!resolve_overlap(&mut mover, &obstacle));
    }

    #[test]
    fn test_horizontal_correction_pushes_clear() {
        // Mover straddles the obstacle's right edge by 2 pixels.
        let mut mover = solid_body("mover", 10, IVec2::new(8, 0));
        let obstacle = solid_body("obstacle", 10, IVec2::new(0, 0));

        assert!(resolve_overlap(&mut mover, &obstacle));
        assert_eq!(mover.position, IVec2::new(10, 0));

        // Idempotence after correction: the pair no longer overlaps.
        assert!(!resolve_overlap(&mut mover, &obstacle));
    }

    #[test]
    fn test_vertical_correction_pushes_clear() {
        // Mover straddles the obstacle's bottom edge by 2 pixels.
        let mut mover = solid_body("mover", 10, IVec2::new(0, 8));
        let obstacle = solid_body("obstacle", 10, IVec2::new(0, 0));

        assert!(resolve_overlap(&mut mover, &obstacle));
        assert_eq!(mover.position, IVec2::new(0, 10));
        assert!(!resolve_overlap(&mut mover, &obstacle));
    }

    #[test]
    fn test_non_solid_bodies_detect_without_displacement() {
        let mut mover = solid_body("mover", 10, IVec2::new(8, 0));
        mover.solid = false;
        let obstacle = solid_body("obstacle", 10, IVec2::new(0, 0));

        assert!(resolve_overlap(&mut mover, &obstacle));
        assert_eq!(mover.position, IVec2::new(8, 0));
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        let room = Bounds::new(0, 0, 1000, 1000);
        // Opaque only in the top-left quadrant.
        let top_left = Arc::new(OpacityMask::from_fn(4, 4, |x, y| x < 2 && y < 2));
        // Opaque only in the bottom-right quadrant.
        let bottom_right = Arc::new(OpacityMask::from_fn(4, 4, |x, y| x >= 2 && y >= 2));

        // Bounding boxes overlap over a region where both masks are
        // transparent.
        let mut mover = BodyCore::new("mover", top_left, IVec2::new(0, 0), room);
        let obstacle = BodyCore::new("obstacle", bottom_right, IVec2::new(2, 2), room);
        assert!(!resolve_overlap(&mut mover, &obstacle));
        assert_eq!(mover.position, IVec2::new(0, 0));
    }

    #[test]
    fn test_walls_ignore_a_contained_body() {
        let mut body = solid_body("body", 10, IVec2::new(40, 40));
        body.room = Bounds::new(0, 0, 100, 100);
        assert!(!resolve_walls(&mut body));
        assert_eq!(body.position, IVec2::new(40, 40));
    }

    #[test]
    fn test_walls_push_back_one_axis() {
        let mut body = solid_body("body", 10, IVec2::new(-3, 5));
        body.room = Bounds::new(0, 0, 100, 100);
        assert!(resolve_walls(&mut body));
        assert_eq!(body.position, IVec2::new(0, 5));
    }

    #[test]
    fn test_walls_push_back_both_axes_in_a_corner() {
        let mut body = solid_body("body", 10, IVec2::new(96, -4));
        body.room = Bounds::new(0, 0, 100, 100);
        assert!(resolve_walls(&mut body));
        assert_eq!(body.position, IVec2::new(90, 0));
    }

    proptest! {
        #[test]
        fn prop_walls_leave_intersecting_bodies_inside(
            x in -9..100i32,
            y in -9..100i32,
        ) {
            let mut body = solid_body("body", 10, IVec2::new(x, y));
            body.room = Bounds::new(0, 0, 100, 100);
            resolve_walls(&mut body);

            let bounds = body.bounds();
            prop_assert!(bounds.left() >= 0 && bounds.right() <= 100);
            prop_assert!(bounds.top() >= 0 && bounds.bottom() <= 100);
        }
    }
}
