//! Single-obstacle jump heuristic.
//!
//! Only the nearest obstacle is considered. A jump fires when it sits inside
//! a speed-scaled window ahead of the player and is high enough to need
//! clearing. Heights between the two thresholds are left alone.

use strum::{Display, IntoStaticStr};

use crate::game::GameSnapshot;

/// Distance at which the jump window opens, at 1x speed
pub const JUMP_WINDOW_START: f32 = 100.0;
/// Width of the jump window (not scaled by speed)
pub const JUMP_WINDOW_WIDTH: f32 = 50.0;
/// Obstacles above this height are jumped
pub const HIGH_OBSTACLE_Y: f32 = 150.0;
/// Obstacles below this height are low
pub const LOW_OBSTACLE_Y: f32 = 100.0;
/// Player above this height is already airborne / elevated
pub const ELEVATED_PLAYER_Y: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Action {
    #[strum(serialize = "JUMP")]
    Jump,
    #[strum(serialize = "HOLD")]
    Hold,
}

#[allow(clippy::if_same_then_else)] // Suppression branch is kept explicit
pub fn decide(snapshot: &GameSnapshot) -> Action {
    let Some(nearest) = snapshot.nearest() else {
        return Action::Hold;
    };

    let distance = nearest.x - snapshot.player.x;
    let window_start = JUMP_WINDOW_START * snapshot.game_speed;
    let window_end = window_start + JUMP_WINDOW_WIDTH;

    if !(window_start <= distance && distance < window_end) {
        return Action::Hold;
    }

    if nearest.y > HIGH_OBSTACLE_Y {
        Action::Jump
    } else if nearest.y < LOW_OBSTACLE_Y && snapshot.player.y > ELEVATED_PLAYER_Y {
        // Low obstacle seen from above: stay down
        Action::Hold
    } else {
        Action::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Obstacle, Position};
    use proptest::prelude::*;

    fn snapshot(player_y: f32, speed: f32, obstacles: &[(f32, f32)]) -> GameSnapshot {
        GameSnapshot {
            player: Position { x: 0.0, y: player_y },
            is_dead: false,
            game_speed: speed,
            obstacles: obstacles
                .iter()
                .map(|&(x, y)| Obstacle {
                    x,
                    y,
                    width: 30.0,
                    kind: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_no_obstacles_holds() {
        assert_eq!(decide(&snapshot(0.0, 1.0, &[])), Action::Hold);
    }

    #[test]
    fn test_window_start_is_inclusive() {
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(100.0, 200.0)])), Action::Jump);
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(99.99, 200.0)])), Action::Hold);
    }

    #[test]
    fn test_window_end_is_exclusive() {
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(149.9, 200.0)])), Action::Jump);
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(150.0, 200.0)])), Action::Hold);
    }

    #[test]
    fn test_window_scales_with_speed() {
        // At 2x the window is [200, 250)
        assert_eq!(decide(&snapshot(0.0, 2.0, &[(120.0, 200.0)])), Action::Hold);
        assert_eq!(decide(&snapshot(0.0, 2.0, &[(200.0, 200.0)])), Action::Jump);
        assert_eq!(decide(&snapshot(0.0, 2.0, &[(249.0, 200.0)])), Action::Jump);
        assert_eq!(decide(&snapshot(0.0, 2.0, &[(250.0, 200.0)])), Action::Hold);
    }

    #[test]
    fn test_low_obstacle_from_elevated_position_holds() {
        assert_eq!(decide(&snapshot(250.0, 1.0, &[(120.0, 50.0)])), Action::Hold);
    }

    #[test]
    fn test_mid_height_falls_through_to_hold() {
        for y in [100.0, 125.0, 150.0] {
            assert_eq!(decide(&snapshot(0.0, 1.0, &[(120.0, y)])), Action::Hold);
        }
        // Low obstacle from the ground is not jumped either
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(120.0, 50.0)])), Action::Hold);
    }

    #[test]
    fn test_height_threshold_is_strict() {
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(120.0, 150.0)])), Action::Hold);
        assert_eq!(decide(&snapshot(0.0, 1.0, &[(120.0, 150.5)])), Action::Jump);
    }

    #[test]
    fn test_only_nearest_obstacle_counts() {
        // Nearest is out of the window, second would trigger
        let s = snapshot(0.0, 1.0, &[(60.0, 300.0), (120.0, 300.0)]);
        assert_eq!(decide(&s), Action::Hold);
    }

    #[test]
    fn test_distance_is_relative_to_player() {
        let mut s = snapshot(0.0, 1.0, &[(1120.0, 300.0)]);
        s.player.x = 1000.0;
        assert_eq!(decide(&s), Action::Jump);
    }

    #[test]
    fn test_decide_is_deterministic() {
        let s = snapshot(210.0, 1.3, &[(140.0, 180.0), (300.0, 20.0)]);
        let first = decide(&s);
        for _ in 0..10 {
            assert_eq!(decide(&s), first);
        }
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Jump.to_string(), "JUMP");
        let label: &'static str = Action::Hold.into();
        assert_eq!(label, "HOLD");
    }

    fn arb_snapshot() -> impl Strategy<Value = GameSnapshot> {
        (
            -1000.0..1000.0f32,
            0.0..1000.0f32,
            any::<bool>(),
            0.1..5.0f32,
            prop::collection::vec((0.0..600.0f32, 0.0..400.0f32, any::<i32>()), 0..6),
        )
            .prop_map(|(px, py, is_dead, game_speed, obstacles)| GameSnapshot {
                player: Position { x: px, y: py },
                is_dead,
                game_speed,
                obstacles: obstacles
                    .into_iter()
                    .map(|(dx, y, kind)| Obstacle {
                        x: px + dx,
                        y,
                        width: 30.0,
                        kind,
                    })
                    .collect(),
            })
    }

    proptest! {
        #[test]
        fn test_decide_is_pure(snapshot in arb_snapshot()) {
            let copy = snapshot.clone();
            prop_assert_eq!(decide(&snapshot), decide(&copy));
            prop_assert_eq!(decide(&snapshot), decide(&snapshot));
            prop_assert_eq!(snapshot, copy);
        }

        #[test]
        fn test_jump_only_for_high_obstacle_in_window(snapshot in arb_snapshot()) {
            let jumps = match snapshot.nearest() {
                Some(nearest) => {
                    let distance = nearest.x - snapshot.player.x;
                    let start = JUMP_WINDOW_START * snapshot.game_speed;
                    start <= distance
                        && distance < start + JUMP_WINDOW_WIDTH
                        && nearest.y > HIGH_OBSTACLE_Y
                }
                None => false,
            };
            prop_assert_eq!(decide(&snapshot) == Action::Jump, jumps);
        }
    }
}
