//! Per-frame simulation tick
//!
//! One call advances the paddle and the ball by one step of their velocities and
//! resolves every collision the new position produces.

use super::collision::{hits_brick, hits_paddle, is_lost, wall_contact};
use super::state::{GameEvent, GameState};
use crate::tuning::{GameTuning, RefillPolicy};

/// Advance the game by one tick, returning what happened in order
pub fn tick(state: &mut GameState, tuning: &GameTuning) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.paddle.advance(&state.arena);
    move_ball(state, tuning, &mut events);

    for event in &events {
        log::trace!("tick event: {:?}", event);
    }

    events
}

fn move_ball(state: &mut GameState, tuning: &GameTuning, events: &mut Vec<GameEvent>) {
    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Walls
    let contact = wall_contact(ball, &state.arena);
    if contact.side {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::WallBounce);
    }
    if contact.ceiling {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::CeilingBounce);
    }

    // Paddle always sends the ball up, whatever direction it came from
    if hits_paddle(ball, &state.paddle.rect()) {
        ball.vel.y = -ball.speed;
        events.push(GameEvent::PaddleBounce);
    }

    // Bricks: every overlapping brick counts, even several in the same tick.
    // Indexed so a refill mid-loop is seen by the bricks that follow.
    for row in 0..state.bricks.rows().len() {
        for col in 0..state.bricks.rows()[row].len() {
            let Some(brick) = state.bricks.get_mut(row, col) else {
                continue;
            };
            if !brick.visible || !hits_brick(&state.ball, &brick.rect()) {
                continue;
            }

            brick.visible = false;
            state.ball.vel.y = -state.ball.vel.y;
            events.push(GameEvent::BrickDestroyed { row, col });
            increase_score(state, tuning, events);
        }
    }

    if is_lost(&state.ball, &state.arena) {
        events.push(GameEvent::BallLost);
    }
}

/// Award a point, then apply speed-up and refill rules
fn increase_score(state: &mut GameState, tuning: &GameTuning, events: &mut Vec<GameEvent>) {
    state.score += 1;

    if tuning.speeds_up_at(state.score) {
        let speed = state.ball.speed + tuning.speed_increment;
        state.ball.set_speed(speed);
        log::info!("Score {}: ball speed up to {}", state.score, speed);
        events.push(GameEvent::SpeedUp { speed });
    }

    let refill = match tuning.refill {
        RefillPolicy::WhenCleared => state.bricks.is_cleared(),
        RefillPolicy::EveryPoints { points } => state.score.is_multiple_of(points),
    };
    if refill {
        state.bricks.show_all();
        log::info!("Score {}: bricks refilled", state.score);
        events.push(GameEvent::GridRefilled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arena;
    use glam::Vec2;

    fn new_state() -> (GameState, GameTuning) {
        let tuning = GameTuning::default();
        let state = GameState::new(Arena::new(800.0, 600.0), &tuning);
        (state, tuning)
    }

    fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
        state.ball.pos = pos;
        state.ball.vel = vel;
    }

    #[test]
    fn test_paddle_moves_and_clamps() {
        let (mut state, tuning) = new_state();
        state.paddle.dx = 8.0;

        tick(&mut state, &tuning);
        assert_eq!(state.paddle.pos.x, 368.0);

        for _ in 0..100 {
            tick(&mut state, &tuning);
            place_ball(&mut state, Vec2::new(400.0, 300.0), Vec2::new(2.0, -2.0));
        }
        assert_eq!(state.paddle.pos.x, 720.0);
    }

    #[test]
    fn test_left_wall_flips_once_per_crossing() {
        let (mut state, tuning) = new_state();
        place_ball(&mut state, Vec2::new(11.0, 300.0), Vec2::new(-2.0, -2.0));

        let events = tick(&mut state, &tuning);
        assert_eq!(state.ball.pos.x, 9.0);
        assert_eq!(state.ball.vel.x, 2.0);
        assert_eq!(events, vec![GameEvent::WallBounce]);

        // Next tick moves back inside without another flip
        let events = tick(&mut state, &tuning);
        assert_eq!(state.ball.vel.x, 2.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_right_wall_and_ceiling() {
        let (mut state, tuning) = new_state();
        place_ball(&mut state, Vec2::new(789.0, 11.0), Vec2::new(2.0, -2.0));

        let events = tick(&mut state, &tuning);
        assert_eq!(state.ball.vel, Vec2::new(-2.0, 2.0));
        assert_eq!(events, vec![GameEvent::WallBounce, GameEvent::CeilingBounce]);
    }

    #[test]
    fn test_paddle_bounce_always_upward() {
        let (mut state, tuning) = new_state();

        // Falling onto the paddle
        place_ball(&mut state, Vec2::new(400.0, 571.0), Vec2::new(2.0, 2.0));
        let events = tick(&mut state, &tuning);
        assert_eq!(state.ball.vel.y, -2.0);
        assert!(events.contains(&GameEvent::PaddleBounce));

        // Already rising while overlapping: still set to -speed, not flipped
        place_ball(&mut state, Vec2::new(400.0, 575.0), Vec2::new(2.0, -2.0));
        tick(&mut state, &tuning);
        assert_eq!(state.ball.vel.y, -2.0);
    }

    #[test]
    fn test_paddle_edge_overlap_misses() {
        let (mut state, tuning) = new_state();
        // Ball straddles the paddle's left edge (paddle spans 360..440)
        place_ball(&mut state, Vec2::new(363.0, 575.0), Vec2::new(-2.0, 2.0));

        let events = tick(&mut state, &tuning);
        assert!(!events.contains(&GameEvent::PaddleBounce));
        assert_eq!(state.ball.vel.y, 2.0);
    }

    #[test]
    fn test_brick_destroyed() {
        let (mut state, tuning) = new_state();
        // Top-left brick spans x 40..110, y 60..80
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);

        assert_eq!(events, vec![GameEvent::BrickDestroyed { row: 0, col: 0 }]);
        assert!(!state.bricks.get(0, 0).unwrap().visible);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, 2.0);
        assert_eq!(state.bricks.visible_count(), 34);
    }

    #[test]
    fn test_hidden_brick_is_ignored() {
        let (mut state, tuning) = new_state();
        state.bricks.get_mut(0, 0).unwrap().visible = false;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.vel.y, -2.0);
    }

    #[test]
    fn test_two_bricks_in_one_tick() {
        let (mut state, tuning) = new_state();
        // Between rows 0 and 1, inside both first bricks horizontally (80..110)
        place_ball(&mut state, Vec2::new(95.0, 87.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);

        assert_eq!(
            events,
            vec![
                GameEvent::BrickDestroyed { row: 0, col: 0 },
                GameEvent::BrickDestroyed { row: 1, col: 0 },
            ]
        );
        assert_eq!(state.score, 2);
        // Two flips cancel out
        assert_eq!(state.ball.vel.y, -2.0);
    }

    #[test]
    fn test_speed_up_every_ten_points() {
        let (mut state, tuning) = new_state();

        for (score, expected_speed) in [(9, 3.0), (19, 4.0), (29, 5.0)] {
            state.bricks.show_all();
            state.score = score;
            let speed = state.ball.speed;
            place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(-speed, -speed));

            let events = tick(&mut state, &tuning);

            assert_eq!(state.score, score + 1);
            assert_eq!(state.ball.speed, expected_speed);
            // dy was flipped by the hit, dx kept its sign
            assert_eq!(state.ball.vel, Vec2::new(-expected_speed, expected_speed));
            assert!(events.contains(&GameEvent::SpeedUp {
                speed: expected_speed
            }));
        }
    }

    #[test]
    fn test_no_speed_up_between_intervals() {
        let (mut state, tuning) = new_state();
        state.score = 4;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        tick(&mut state, &tuning);
        assert_eq!(state.ball.speed, 2.0);
    }

    #[test]
    fn test_refill_when_cleared() {
        let (mut state, tuning) = new_state();
        state.bricks.iter_mut().for_each(|b| b.visible = false);
        state.bricks.get_mut(0, 0).unwrap().visible = true;
        state.score = 34;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);

        assert_eq!(state.score, 35);
        assert!(events.contains(&GameEvent::GridRefilled));
        assert_eq!(state.bricks.visible_count(), 35);
    }

    #[test]
    fn test_no_refill_with_bricks_left() {
        let (mut state, tuning) = new_state();
        state.score = 44;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);
        assert!(!events.contains(&GameEvent::GridRefilled));
        assert_eq!(state.bricks.visible_count(), 34);
    }

    #[test]
    fn test_legacy_refill_ignores_remaining_bricks() {
        let (mut state, mut tuning) = new_state();
        tuning.refill = RefillPolicy::legacy(&tuning.bricks);
        state.score = 44;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        let events = tick(&mut state, &tuning);

        assert_eq!(state.score, 45);
        assert!(events.contains(&GameEvent::GridRefilled));
        assert_eq!(state.bricks.visible_count(), 35);
    }

    #[test]
    fn test_legacy_refill_never_fires_on_full_clear() {
        let (mut state, mut tuning) = new_state();
        tuning.refill = RefillPolicy::legacy(&tuning.bricks);
        state.bricks.iter_mut().for_each(|b| b.visible = false);
        state.bricks.get_mut(0, 0).unwrap().visible = true;
        state.score = 34;
        place_ball(&mut state, Vec2::new(75.0, 90.0), Vec2::new(0.0, -2.0));

        tick(&mut state, &tuning);
        assert!(state.bricks.is_cleared());
    }

    #[test]
    fn test_ball_lost_below_bottom() {
        let (mut state, tuning) = new_state();
        state.paddle.pos.x = 0.0;
        place_ball(&mut state, Vec2::new(400.0, 589.0), Vec2::new(0.0, 2.0));

        let events = tick(&mut state, &tuning);
        assert_eq!(events, vec![GameEvent::BallLost]);
    }
}
