use snake_rank::game::{
    Clock, CollisionType, Direction, GameEngine, GameOver, GameSettings, ManualClock, Phase,
    Position, TickOutcome,
};

fn new_engine(seed: u64) -> (GameEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_000);
    let engine = GameEngine::with_clock(GameSettings::default(), clock.clone()).with_seed(seed);
    (engine, clock)
}

/// Step time forward by exactly one tick interval and advance
fn tick(engine: &mut GameEngine<ManualClock>, clock: &ManualClock) -> TickOutcome {
    let now = clock.advance_by(engine.tick_interval_ms());
    engine.advance(now)
}

#[test]
fn test_eat_food_scenario() {
    let (mut engine, clock) = new_engine(11);
    assert_eq!(
        engine.snake().body,
        vec![
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10)
        ]
    );
    assert_eq!(engine.food(), Position::new(15, 15));

    engine.start();
    engine.set_direction(Direction::Right);

    for _ in 0..5 {
        assert_eq!(
            tick(&mut engine, &clock),
            TickOutcome::Moved { ate_food: false }
        );
    }
    assert_eq!(engine.snake().head(), Position::new(15, 10));
    assert_eq!(engine.snake().len(), 3);
    assert_eq!(engine.score(), 0);

    engine.set_direction(Direction::Down);
    for _ in 0..4 {
        tick(&mut engine, &clock);
    }
    assert_eq!(engine.snake().head(), Position::new(15, 14));
    assert_eq!(engine.score(), 0);

    assert_eq!(
        tick(&mut engine, &clock),
        TickOutcome::Moved { ate_food: true }
    );
    assert_eq!(engine.snake().head(), Position::new(15, 15));
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.snake().len(), 4);
    assert_ne!(engine.food(), Position::new(15, 15));
    assert!(!engine.snake().occupies(engine.food()));
}

#[test]
fn test_wall_collision_on_exact_tick() {
    let (mut engine, clock) = new_engine(5);
    engine.start();

    // Can't reverse straight into Left, so go Up one row first
    engine.set_direction(Direction::Up);
    tick(&mut engine, &clock);
    engine.set_direction(Direction::Left);

    while engine.snake().head().x > 0 {
        tick(&mut engine, &clock);
        assert_eq!(engine.phase(), Phase::Playing);
    }
    assert_eq!(engine.snake().head(), Position::new(0, 9));

    let outcome = tick(&mut engine, &clock);
    assert_eq!(
        outcome,
        TickOutcome::GameOver(GameOver {
            score: 0,
            length: 3,
            collision: Some(CollisionType::Wall),
        })
    );
    assert_eq!(engine.phase(), Phase::Ended);
    // The crash is visible: the head sits off the board
    assert_eq!(engine.snake().head(), Position::new(-1, 9));

    // Frozen afterwards
    assert_eq!(tick(&mut engine, &clock), TickOutcome::Idle);
    assert_eq!(engine.snake().head(), Position::new(-1, 9));
}

#[test]
fn test_heads_stay_in_bounds_until_game_over() {
    let settings = GameSettings::default();
    let (width, height) = (settings.grid_width(), settings.grid_height());
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for seed in 0..20u64 {
        let (mut engine, clock) = new_engine(seed);
        engine.start();

        for step in 0..400usize {
            if step % 7 == 0 {
                engine.set_direction(turns[(step / 7 + seed as usize) % turns.len()]);
            }
            match tick(&mut engine, &clock) {
                TickOutcome::GameOver(game_over) => {
                    let head = engine.snake().head();
                    if game_over.collision == Some(CollisionType::Wall) {
                        assert!(!head.is_within(width, height));
                    }
                    break;
                }
                TickOutcome::Moved { .. } => {
                    assert!(engine.snake().head().is_within(width, height));
                }
                TickOutcome::Idle => panic!("a full interval must produce a tick"),
            }
        }
    }
}

#[test]
fn test_no_reversal_between_committed_ticks() {
    let (mut engine, clock) = new_engine(2);
    engine.start();
    let inputs = [
        Direction::Left,
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::Left,
    ];

    let mut previous = engine.direction();
    for pair in inputs.chunks(2) {
        for &d in pair {
            engine.set_direction(d);
        }
        if let TickOutcome::GameOver(_) = tick(&mut engine, &clock) {
            break;
        }
        let committed = engine.direction();
        assert!(!committed.is_opposite(previous));
        previous = committed;
    }
}

#[test]
fn test_growth_law() {
    let (mut engine, clock) = new_engine(8);
    engine.start();
    engine.set_direction(Direction::Down);

    // Snake from (10,10) going down hits food (15,15) only after turning
    let mut len = engine.snake().len();
    let mut score = engine.score();
    for step in 0..30 {
        if step == 5 {
            engine.set_direction(Direction::Right);
        }
        let food_before = engine.food();
        match tick(&mut engine, &clock) {
            TickOutcome::Moved { ate_food: true } => {
                assert_eq!(engine.snake().len(), len + 1);
                assert_eq!(engine.score(), score + 10);
                assert_ne!(engine.food(), food_before);
                assert!(!engine.snake().occupies(engine.food()));
            }
            TickOutcome::Moved { ate_food: false } => {
                assert_eq!(engine.snake().len(), len);
                assert_eq!(engine.score(), score);
                assert_eq!(engine.food(), food_before);
            }
            _ => break,
        }
        len = engine.snake().len();
        score = engine.score();
    }
    assert!(score >= 10);
}

#[test]
fn test_restart_matches_fresh_engine() {
    let fresh = new_engine(0).0.snapshot();

    for phase_steps in 0..4 {
        let (mut engine, clock) = new_engine(0);
        if phase_steps >= 1 {
            engine.start();
            tick(&mut engine, &clock);
        }
        if phase_steps == 2 {
            engine.pause();
        }
        if phase_steps == 3 {
            engine.end();
        }

        engine.restart();
        assert_eq!(engine.snapshot(), fresh);
        assert_eq!(engine.pending_direction(), Direction::Right);
    }
}

#[test]
fn test_pause_does_not_count_toward_next_tick() {
    let (mut engine, clock) = new_engine(1);
    engine.start();

    clock.advance_by(100);
    assert_eq!(engine.advance_now(), TickOutcome::Idle);
    engine.pause();

    // A long break
    clock.advance_by(60_000);
    assert_eq!(engine.advance_now(), TickOutcome::Idle);
    engine.resume();
    let resumed_at = clock.now_ms();

    clock.set(resumed_at + 1);
    assert_eq!(engine.advance_now(), TickOutcome::Idle);
    assert_eq!(engine.snake().head(), Position::new(10, 10));

    clock.set(resumed_at + 149);
    assert_eq!(engine.advance_now(), TickOutcome::Idle);

    clock.set(resumed_at + 150);
    assert_eq!(
        engine.advance_now(),
        TickOutcome::Moved { ate_food: false }
    );
    assert_eq!(engine.snake().head(), Position::new(11, 10));
}
