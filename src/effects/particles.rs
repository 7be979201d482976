use rand::Rng;

use crate::game::Position;

/// Multiplier applied to each particle's size every frame.
const SIZE_DECAY: f32 = 0.95;
/// Particles smaller than this are dropped.
const FADE_OUT_SIZE: f32 = 0.5;
/// Burst tint, matching the food marker (neon pink).
const BURST_COLOR: (u8, u8, u8) = (255, 0, 85);

/// One decorative spark. Positions and velocities are in pixel space so
/// particles drift freely between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub color: (u8, u8, u8),
}

/// Pool of live particles. Owns integration and removal; everything else
/// only reads it for drawing.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cell_size: f32,
    burst_count: usize,
    rng: rand::rngs::ThreadRng,
}

impl ParticleSystem {
    pub fn new(cell_size: f32, burst_count: usize) -> Self {
        Self {
            particles: Vec::new(),
            cell_size,
            burst_count,
            rng: rand::thread_rng(),
        }
    }

    /// Spawn a burst at the centre of a cell, scattering outward.
    pub fn burst(&mut self, cell: Position) {
        let cx = cell.x as f32 * self.cell_size + self.cell_size / 2.0;
        let cy = cell.y as f32 * self.cell_size + self.cell_size / 2.0;

        for _ in 0..self.burst_count {
            self.particles.push(Particle {
                x: cx,
                y: cy,
                vx: self.rng.gen_range(-2.0..2.0),
                vy: self.rng.gen_range(-2.0..2.0),
                size: self.rng.gen_range(1.0..4.0),
                color: BURST_COLOR,
            });
        }
    }

    /// Advance and decay every particle by one frame, dropping the ones
    /// that have faded out.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.size *= SIZE_DECAY;
        }

        self.particles.retain(|p| p.size >= FADE_OUT_SIZE);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Project each live particle onto the cell it currently covers.
    pub fn cells(&self) -> impl Iterator<Item = (Position, f32, (u8, u8, u8))> + '_ {
        let cell_size = self.cell_size;
        self.particles.iter().map(move |p| {
            let cell = Position::new(
                (p.x / cell_size).floor() as i32,
                (p.y / cell_size).floor() as i32,
            );
            (cell, p.size, p.color)
        })
    }
}
