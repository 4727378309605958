// All tunable simulation constants in one place.

// Tank (origin-centered box, full dimensions)
pub const TANK_WIDTH: f32 = 4.0;
pub const TANK_HEIGHT: f32 = 4.0;
pub const TANK_DEPTH: f32 = 4.0;

// Populations
pub const INITIAL_PREY_COUNT: usize = 6;
pub const INITIAL_PREDATOR_COUNT: usize = 2;
pub const INITIAL_OBSTACLE_COUNT: usize = 2;
pub const MAX_AGENT_COUNT: usize = 64;

// Steering
pub const INFLUENCE_RADIUS: f32 = 3.0;
pub const PREY_FLEE_STRENGTH: f32 = 0.05;
pub const PREDATOR_CHASE_STRENGTH: f32 = 0.04;
pub const DISTANCE_EPSILON: f32 = 1e-6;

// Species parameters
pub const PREY_BOUND_RADIUS: f32 = 0.2;
pub const PREY_STEP_SIZE: f32 = 0.01;
pub const PREDATOR_BOUND_RADIUS: f32 = 0.5;
pub const PREDATOR_STEP_SIZE: f32 = 0.012;
pub const PREDATOR_STEP_BOOST: f32 = 1.05;
pub const PREDATOR_STEP_MAX: f32 = 0.02;
pub const OBSTACLE_BOUND_RADIUS: f32 = 0.3;

// Pose animation (degrees per tick)
pub const PREY_LIMB_SWING_SPEED: f32 = 0.5;
pub const PREDATOR_LEG_SWING_SPEED: f32 = 1.0;

// Simulation
pub const FIXED_DT: f32 = 1.0 / 60.0;

// Camera
pub const CAMERA_DISTANCE_MIN: f32 = 2.0;
pub const CAMERA_DISTANCE_MAX: f32 = 16.0;
pub const CAMERA_ORBIT_SPEED: f32 = 1.6;
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;
pub const CAMERA_SMOOTH_SPEED: f32 = 8.0;
