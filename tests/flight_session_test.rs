use common::test_utils::{HeldKeys, assert_close, park_rings};
use ring_flight::{
    GameEvent, GameSession, KeyCode,
    game::{Phase, RING_COUNT},
};

mod common;

#[test]
fn one_frame_without_input_flies_straight_ahead() {
    let mut session = GameSession::new(1);
    park_rings(&mut session);

    let events = session.update(&HeldKeys::none());

    let position = session.airplane().position;
    assert_close(position.x, 0.0);
    assert_close(position.y, 0.0);
    assert_close(position.z, -0.5);
    assert!(events.is_empty());
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn ring_just_inside_the_radius_is_collected() {
    let mut session = GameSession::new(2);
    park_rings(&mut session);
    // 4.9 in front of where the airplane will be after this frame
    session.rings_mut()[3].position = [0.0, 0.0, -5.4].into();

    let events = session.update(&HeldKeys::none());

    assert_eq!(session.score(), 10);
    assert_eq!(events, vec![GameEvent::Score(10)]);
    let respawned = &session.rings()[3];
    assert!(respawned.position.z <= -100.5 && respawned.position.z > -150.5);
    assert!((-50.0..50.0).contains(&respawned.position.x));
    assert!((10.0..60.0).contains(&respawned.position.y));
}

#[test]
fn ring_just_outside_the_radius_is_kept() {
    let mut session = GameSession::new(2);
    park_rings(&mut session);
    session.rings_mut()[3].position = [0.0, 0.0, -5.6].into();

    let events = session.update(&HeldKeys::none());

    assert_eq!(session.score(), 0);
    assert!(events.is_empty());
    assert_close(session.rings()[3].position.z, -5.6);
}

#[test]
fn every_ring_in_reach_scores_in_the_same_frame() {
    let mut session = GameSession::new(3);
    park_rings(&mut session);
    session.rings_mut()[0].position = [1.0, 0.0, -1.0].into();
    session.rings_mut()[7].position = [-1.0, 1.0, 0.0].into();

    let events = session.update(&HeldKeys::none());

    assert_eq!(session.score(), 20);
    assert_eq!(events, vec![GameEvent::Score(10), GameEvent::Score(20)]);
    assert_eq!(session.rings().len(), RING_COUNT);
}

#[test]
fn leaving_the_world_ends_the_game() {
    let mut session = GameSession::new(4);
    park_rings(&mut session);
    session.airplane_mut().position = [0.0, 0.0, -101.0].into();

    let events = session.update(&HeldKeys::none());

    assert!(session.is_over());
    assert_eq!(events, vec![GameEvent::GameOver { final_score: 0 }]);
}

#[test]
fn every_axis_is_bounded() {
    for start in [[101.0, 0.0, 0.0], [0.0, -101.0, 0.0], [0.0, 101.0, 0.0]] {
        let mut session = GameSession::new(5);
        park_rings(&mut session);
        session.airplane_mut().position = start.into();

        session.update(&HeldKeys::none());

        assert!(session.is_over(), "{:?} should be out of bounds", start);
    }
}

#[test]
fn the_boundary_itself_is_inside() {
    let mut session = GameSession::new(6);
    park_rings(&mut session);
    session.airplane_mut().position = [0.0, 0.0, -99.5].into();

    session.update(&HeldKeys::none());

    assert_close(session.airplane().position.z, -100.0);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn the_final_score_includes_the_last_ring() {
    let mut session = GameSession::new(7);
    park_rings(&mut session);
    session.airplane_mut().position = [0.0, 0.0, -101.0].into();
    session.rings_mut()[0].position = [0.0, 0.0, -103.5].into();

    let events = session.update(&HeldKeys::none());

    assert_eq!(
        events,
        vec![
            GameEvent::Score(10),
            GameEvent::GameOver { final_score: 10 }
        ]
    );
}

#[test]
fn game_over_is_terminal() {
    let mut session = GameSession::new(8);
    park_rings(&mut session);
    session.airplane_mut().position = [0.0, 0.0, -101.0].into();
    session.update(&HeldKeys::none());
    assert!(session.is_over());

    let airplane = session.airplane().clone();
    let camera = session.camera().clone();
    let rings = session.rings().clone();
    let score = session.score();

    let keys = HeldKeys(vec![KeyCode::KeyW, KeyCode::KeyA]);
    for _ in 0..10 {
        assert!(session.update(&keys).is_empty());
    }

    assert_eq!(session.airplane(), &airplane);
    assert_eq!(session.camera(), &camera);
    assert_eq!(session.rings(), &rings);
    assert_eq!(session.score(), score);
    assert_eq!(session.phase(), Phase::GameOver);
}

#[test]
fn pitch_and_roll_change_together() {
    let mut session = GameSession::new(9);
    park_rings(&mut session);

    session.update(&HeldKeys(vec![KeyCode::ArrowUp, KeyCode::ArrowLeft]));

    let attitude = session.airplane().attitude;
    assert_close(attitude.x.0, -0.03);
    assert_close(attitude.y.0, 0.0);
    assert_close(attitude.z.0, 0.03);
}

#[test]
fn down_and_right_mirror_up_and_left() {
    let mut session = GameSession::new(9);
    park_rings(&mut session);

    session.update(&HeldKeys(vec![KeyCode::KeyS, KeyCode::KeyD]));

    let attitude = session.airplane().attitude;
    assert_close(attitude.x.0, 0.03);
    assert_close(attitude.z.0, -0.03);
}

#[test]
fn arrow_keys_and_wasd_steer_alike() {
    let mut arrows = GameSession::new(10);
    let mut wasd = GameSession::new(10);
    park_rings(&mut arrows);
    park_rings(&mut wasd);

    for _ in 0..20 {
        arrows.update(&HeldKeys(vec![KeyCode::ArrowDown, KeyCode::ArrowRight]));
        wasd.update(&HeldKeys(vec![KeyCode::KeyS, KeyCode::KeyD]));
    }

    assert_eq!(arrows.airplane(), wasd.airplane());
    assert_eq!(arrows.camera(), wasd.camera());
}

#[test]
fn opposite_controls_cancel_out() {
    let mut session = GameSession::new(11);
    park_rings(&mut session);

    session.update(&HeldKeys(vec![KeyCode::KeyW, KeyCode::KeyS]));

    assert_close(session.airplane().attitude.x.0, 0.0);
    assert_close(session.airplane().position.z, -0.5);
}

#[test]
fn score_only_grows_in_steps_of_ten() {
    let mut session = GameSession::new(12);
    let mut last_score = 0;
    let mut collected = 0;

    for frame in 0..2000 {
        let keys = match (frame / 40) % 4 {
            0 => HeldKeys::none(),
            1 => HeldKeys(vec![KeyCode::KeyA]),
            2 => HeldKeys(vec![KeyCode::KeyS]),
            _ => HeldKeys(vec![KeyCode::KeyW, KeyCode::KeyD]),
        };
        for event in session.update(&keys) {
            if let GameEvent::Score(score) = event {
                collected += 1;
                assert_eq!(score, last_score + 10);
                last_score = score;
            }
        }
        assert!(session.score() >= last_score);
        assert_eq!(session.rings().len(), RING_COUNT);
        if session.is_over() {
            break;
        }
    }

    assert_eq!(session.score(), collected * 10);
}

#[test]
fn camera_trails_behind_and_above() {
    let mut session = GameSession::new(13);
    park_rings(&mut session);

    for _ in 0..100 {
        session.update(&HeldKeys::none());
    }

    let airplane = session.airplane().position;
    let camera = session.camera();
    assert_close(camera.target.z, airplane.z);
    assert!(camera.position.y > airplane.y + 2.9);
    assert!(camera.position.z > airplane.z + 9.9);
}
