use super::{
    command::{Command, Direction},
    config::GameConfig,
    state::{Collision, GameState, Position, Snake},
};
use rand::{Rng, seq::SliceRandom};

/// Random draws before falling back to scanning for free cells. The
/// rejection path only degrades once the snake covers most of the board.
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// What happened during a step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// The collision that ended the run, if any
    pub collision: Option<Collision>,
    /// The snake covers every cell; the board is complete
    pub board_full: bool,
}

/// Result of advancing the game by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the run has reached a terminal state
    pub terminated: bool,
    pub info: StepInfo,
}

impl StepResult {
    fn running(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision: None,
                board_full: false,
            },
        }
    }
}

/// The movement and collision engine. Owns the configuration and the
/// RNG used for food placement; all per-game state lives in `GameState`.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: snake at the grid centre heading right, zero score,
    /// food on a free cell.
    pub fn reset(&mut self) -> GameState {
        let start = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );

        let snake = Snake::new(start, Direction::Right, self.config.initial_snake_length);

        // A fresh snake cannot cover a playable grid; the fallback only
        // fires on degenerate configurations.
        let food = self.place_food(&snake).unwrap_or(start);

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Advance the game by one tick.
    pub fn step(&mut self, state: &mut GameState, command: Command) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision: None,
                    board_full: false,
                },
            };
        }

        // Apply the turn unless it would reverse onto the neck.
        if let Command::Turn(new_direction) = command {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let next_head = state.snake.head().toward(state.snake.direction);

        if let Some(collision) = self.check_collision(state, next_head) {
            state.is_alive = false;
            state.steps += 1;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision: Some(collision),
                    board_full: false,
                },
            };
        }

        let ate_food = next_head == state.food;

        state.snake.advance(ate_food);
        state.steps += 1;

        if ate_food {
            state.score += self.config.score_per_food;

            match self.place_food(&state.snake) {
                Some(cell) => state.food = cell,
                None => {
                    state.is_alive = false;
                    return StepResult {
                        terminated: true,
                        info: StepInfo {
                            ate_food: true,
                            collision: None,
                            board_full: true,
                        },
                    };
                }
            }
        }

        StepResult::running(ate_food)
    }

    /// Check whether moving the head to `pos` ends the run.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<Collision> {
        if !state.in_bounds(pos) {
            return Some(Collision::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(Collision::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random free cell, or `None` when the snake
    /// covers the whole board.
    fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;

        if snake.len() >= width * height {
            return None;
        }

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Dense board: enumerate the free cells instead of sampling.
        let free: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}
