/// Asserts that the snake with the given id is present and dead.
#[macro_export]
macro_rules! assert_snake_dead {
    ($snakes:expr, $id:expr) => {
        let snake = $snakes
            .iter()
            .find(|s| s.id == $id)
            .expect("Snake not found");
        assert!(!snake.alive, "Snake {:?} should be dead but is alive", $id);
    };
}

/// Asserts that the snake with the given id is present and alive.
#[macro_export]
macro_rules! assert_snake_alive {
    ($snakes:expr, $id:expr) => {
        let snake = $snakes
            .iter()
            .find(|s| s.id == $id)
            .expect("Snake not found");
        assert!(snake.alive, "Snake {:?} should be alive but is dead", $id);
    };
}

/// Asserts the post-locomotion chain invariants on one snake.
#[macro_export]
macro_rules! assert_chain_consistent {
    ($snake:expr, $spacing:expr) => {
        let snake = &$snake;
        assert_eq!(
            snake.segments.len(),
            snake.length,
            "segment count does not match length"
        );
        assert_eq!(
            snake.length,
            snake.target_length.floor().max(1.0) as usize,
            "length is not floor(target_length)"
        );
        assert_eq!(snake.segments[0], snake.position, "head segment is not the position");
        for pair in snake.segments.windows(2) {
            let gap = pair[0].distance_to(&pair[1]);
            assert!(gap <= $spacing + 1e-6, "adjacent segments {} apart", gap);
        }
    };
}
