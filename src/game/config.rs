use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the playfield in cells
    pub grid_width: usize,
    /// Height of the playfield in cells
    pub grid_height: usize,
    /// Pixel size of one cell; particle positions live in this space
    pub cell_size: f32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Score awarded per food eaten
    pub score_per_food: u32,
    /// Particles spawned when food is eaten
    pub particles_per_burst: usize,
    /// Simulation ticks per second
    pub tick_hz: u32,
    /// Render frames per second
    pub frame_hz: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 20.0,
            initial_snake_length: 1,
            score_per_food: 10,
            particles_per_burst: 20,
            tick_hz: 15,
            frame_hz: 30,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Small grid, used in tests.
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Period of the simulation clock.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_hz.max(1)))
    }

    /// Period of the render clock, independent of the simulation clock.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.frame_hz.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.score_per_food, 10);
        assert_eq!(config.particles_per_burst, 20);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_clock_periods() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(66));
        assert_eq!(config.frame_interval(), Duration::from_millis(33));

        let degenerate = GameConfig {
            tick_hz: 0,
            ..Default::default()
        };
        assert_eq!(degenerate.tick_interval(), Duration::from_millis(1000));
    }
}
