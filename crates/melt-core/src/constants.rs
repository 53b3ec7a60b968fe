use glam::Vec3;

// Shared tuning constants used by both web and native frontends.

// Particle grid / reference plane
pub const PLANE_SIZE: f32 = 10.0; // world-space edge length of the picture plane
pub const GRID_SEGMENTS: u32 = 128; // segments per side; (segments + 1)^2 particles

// Heat-map raster
pub const HEATMAP_SIZE: u32 = 128; // square raster edge in pixels
pub const HEATMAP_FADE_ALPHA: f32 = 0.1; // weight of the background fill per frame
pub const GLOW_SIZE_FRACTION: f32 = 0.25; // glow sprite edge relative to raster width
pub const GLOW_SPRITE_SIZE: u32 = 64; // procedural glow sprite resolution

// #181818, shared by the clear colour and the heat-map background
pub const BACKGROUND_RGB: [f32; 3] = [24.0 / 255.0, 24.0 / 255.0, 24.0 / 255.0];

// Displacement
pub const STRENGTH_CEILING: f32 = 0.8;
pub const STRENGTH_DECAY_PER_FRAME: f32 = 0.01;
pub const HEAT_EDGE_LOW: f32 = 0.1; // smoothstep window on the heat-map red channel
pub const HEAT_EDGE_HIGH: f32 = 0.3;
pub const DISPLACEMENT_AMPLITUDE: f32 = 3.0;
pub const DISPLACEMENT_LATERAL: f32 = 0.2; // xy spread of the displacement direction

// Point sprites
pub const POINT_SIZE_FACTOR: f32 = 0.15; // multiplied by picture red and resolution.y

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 18.0);

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // radius scale per wheel notch
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Pointer position before any interaction (far outside NDC range)
pub const POINTER_SENTINEL: f32 = 9999.0;

// Pictures larger than this are downscaled before upload
pub const MAX_PICTURE_DIMENSION: u32 = 4096;
