// Shared scene tuning constants used by both web and native frontends.

// Galaxy layout
pub const GALAXY_RADIUS: f32 = 800.0;
pub const GALAXY_ARMS: u32 = 5;
pub const STARS_PER_ARM: u32 = 1000;
pub const SPIRAL_WINDING: f32 = 0.05; // radians of twist per unit of distance
pub const ARM_JITTER: f32 = 0.5; // max random angular offset within an arm
pub const DISK_THICKNESS: f32 = 50.0;

// Star colour ramp (HSL)
pub const HUE_SPAN: f32 = 0.8;
pub const STAR_SATURATION: f32 = 1.0;
pub const STAR_LIGHTNESS: f32 = 0.6;

// Word markers
pub const WORD_COUNT: usize = 150;
pub const WORD_AMPLITUDE: f32 = 10.0;
pub const WORD_SPEED_MIN: f32 = 0.5;
pub const WORD_SPEED_SPAN: f32 = 0.5;
pub const WORD_COLORS: [&str; 4] = ["#FFE29F", "#FFD6E0", "#FFF5E6", "#99DDFF"];

// Per-frame rotation steps (radians per frame, not scaled by dt)
pub const GALAXY_ROTATION_STEP: f32 = 0.0005;
pub const NEBULA_ANGULAR_SPEED: f32 = 0.0005;

// Nebula layers: (size as a multiple of the galaxy radius, colour)
pub const NEBULA_LAYERS: [(f32, &str); 5] = [
    (3.2, "#ff66ff"),
    (2.8, "#66ccff"),
    (2.0, "#66ccff"),
    (1.0, "#ffff66"),
    (0.5, "#fffffcff"),
];

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.8;
pub const CAMERA_ZFAR: f32 = 10_000.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 30.0, 800.0];
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 50.0;
pub const ORBIT_MAX_DISTANCE: f32 = 4_000.0;

// Core sphere
pub const CORE_RADIUS: f32 = 45.0;
pub const CORE_SEGMENTS: u32 = 70;
pub const CORE_COLOR: &str = "#ffffee";

// Sprites
pub const POINT_SIZE: f32 = 10.0;
pub const LABEL_SIZE: [f32; 2] = [80.0, 20.0];
pub const HEART_TEXTURE_SIZE: u32 = 128;

// Label atlas cells keep the 4:1 aspect of the billboards
pub const LABEL_CELL_WIDTH: u32 = 384;
pub const LABEL_CELL_HEIGHT: u32 = 96;
pub const LABEL_ATLAS_COLUMNS: u32 = 5;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.85;
