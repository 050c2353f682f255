// Vector helpers shared by abilities

use glam::Vec2;

/// Move `current` toward `target` by at most `max_delta`, never overshooting
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Split a vector into its direction and its length clamped to `max_length`.
///
/// Returns `None` for a zero-length vector, which has no direction.
pub fn clamped_direction(vector: Vec2, max_length: f32) -> Option<(Vec2, f32)> {
    let length = vector.length();
    if length <= f32::EPSILON {
        return None;
    }
    Some((vector / length, length.min(max_length)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_move_towards_partial_step() {
        let next = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.5);
        assert_relative_eq!(next.x, 2.5);
        assert_relative_eq!(next.y, 0.0);
    }

    #[test]
    fn test_move_towards_does_not_overshoot() {
        let target = Vec2::new(1.0, 1.0);
        assert_eq!(move_towards(Vec2::ZERO, target, 100.0), target);
    }

    #[test]
    fn test_clamped_direction() {
        let (dir, len) = clamped_direction(Vec2::new(0.0, 20.0), 8.0).unwrap();
        assert_relative_eq!(dir.y, 1.0);
        assert_relative_eq!(len, 8.0);

        let (_, len) = clamped_direction(Vec2::new(3.0, 4.0), 8.0).unwrap();
        assert_relative_eq!(len, 5.0);

        assert!(clamped_direction(Vec2::ZERO, 8.0).is_none());
    }
}
