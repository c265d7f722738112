//! Core data models for Kiss Cam.
//! Viewport state read by the render loop, pointer geometry, and the
//! stage (message + decorative particles) driven by the two buttons.

use std::rc::Rc;
use yew::Reducible;

/// Angles offered by the rotation selector.
pub const ROTATION_OPTIONS: [u16; 4] = [0, 90, 180, 270];

/// Horizontal spread of a particle burst, in CSS pixels.
const PARTICLE_SPREAD_PX: f64 = 200.0;
/// Every particle floats up by the same amount.
const PARTICLE_RISE_PX: f64 = 200.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotation(u16);

impl Rotation {
    /// Parses a selector value the way `parseInt` would: leading whitespace,
    /// optional sign, leading digits, trailing junk ignored. Anything that is
    /// not a quarter turn falls back to 0.
    pub fn parse(raw: &str) -> Self {
        parse_leading_int(raw)
            .map(|deg| deg.rem_euclid(360))
            .filter(|deg| deg % 90 == 0)
            .map(|deg| Rotation(deg as u16))
            .unwrap_or_default()
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    pub fn radians(self) -> f64 {
        (self.0 as f64).to_radians()
    }
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|v| sign * v)
}

/// Closed interval the zoom scale is kept in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl ScaleLimits {
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 1.0, max: 4.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub rotation: Rotation,
    pub scale: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            rotation: Rotation::default(),
            scale: 1.0,
        }
    }
}

/// Client coordinates of a pointer, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Burst this particle belongs to; stamped by the reducer.
    pub burst: u32,
    pub id: u32,
    pub drift_x: f64,
    pub rise: f64,
    pub spin_deg: f64,
}

impl Particle {
    /// Builds `count` particles from a random source yielding values in [0, 1).
    pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Vec<Particle> {
        (0..count)
            .map(|i| Particle {
                burst: 0,
                id: i as u32,
                drift_x: (random() - 0.5) * PARTICLE_SPREAD_PX,
                rise: PARTICLE_RISE_PX,
                spin_deg: random() * 360.0,
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageState {
    pub message: String,
    pub particles: Vec<Particle>,
    pub next_burst: u32,
}

impl StageState {
    /// Burst currently on screen, if any.
    pub fn active_burst(&self) -> Option<u32> {
        self.particles.first().map(|p| p.burst)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StageAction {
    BeginSearch { message: String },
    ConfirmMatch { message: String, particles: Vec<Particle> },
    ExpireBurst(u32),
}

impl Reducible for StageState {
    type Action = StageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use StageAction::*;
        let mut new = (*self).clone();
        match action {
            BeginSearch { message } => {
                new.particles.clear();
                new.message = message;
            }
            ConfirmMatch { message, particles } => {
                new.particles.clear();
                new.message = message;
                let burst = new.next_burst;
                new.next_burst = new.next_burst.wrapping_add(1);
                new.particles
                    .extend(particles.into_iter().map(|p| Particle { burst, ..p }));
            }
            ExpireBurst(burst) => {
                if !new.particles.iter().any(|p| p.burst == burst) {
                    return self;
                }
                new.particles.retain(|p| p.burst != burst);
            }
        }
        Rc::new(new)
    }
}
