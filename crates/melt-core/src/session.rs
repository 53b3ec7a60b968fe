//! Session context and the per-frame driver.
//!
//! Front-ends push `InputEvent`s as they arrive and call `Session::tick`
//! once per display refresh. All mutation happens inside `tick`, so the
//! last pointer position queued before a frame is the one that frame sees.

use crate::camera::{Camera, OrbitControls};
use crate::heatmap::{GlowSprite, HeatMap};
use crate::params::MeltParams;
use crate::particles::ParticleField;
use crate::picking::{DisplacementStrength, PickHit, PointerSample, ReferencePlane};
use crate::picture::SourceImage;
use crate::viewport::ViewportState;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer position in logical pixels, origin top-left.
    PointerMove { x: f32, y: f32 },
    DragStart { x: f32, y: f32 },
    DragEnd,
    Wheel { delta_y: f32 },
    Resize {
        width: f32,
        height: f32,
        pixel_ratio: f32,
    },
    Key(String),
    ImageLoaded(Box<SourceImage>),
}

/// Snapshot handed to the renderer after each tick.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub resolution: Vec2,
    pub strength: f32,
    /// The heat-map changed and must be re-uploaded.
    pub heatmap_dirty: bool,
    /// A new source picture to bind, if one arrived this frame.
    pub image: Option<SourceImage>,
    pub overlay_visible: bool,
    /// Physical surface size if the viewport changed this frame.
    pub resized: Option<(u32, u32)>,
}

pub struct Session {
    params: MeltParams,
    camera: Camera,
    controls: OrbitControls,
    viewport: ViewportState,
    plane: ReferencePlane,
    field: ParticleField,
    pointer: PointerSample,
    strength: DisplacementStrength,
    heatmap: HeatMap,
    glow: GlowSprite,
    canvas_coord: Vec2,
    overlay_visible: bool,
    drag_origin: Option<Vec2>,
    queue: SmallVec<[InputEvent; 8]>,
    pending_image: Option<SourceImage>,
    pending_resize: Option<(u32, u32)>,
    frame: u64,
}

impl Session {
    pub fn new(params: MeltParams, viewport: ViewportState) -> Self {
        let seed = params.resolve_seed();
        log::info!(
            "[session] {}x{} viewport, {} segments, seed {}",
            viewport.width,
            viewport.height,
            params.grid_segments,
            seed
        );
        let field = ParticleField::new(params.plane_size, params.grid_segments, seed);
        let heatmap = HeatMap::new(params.heatmap_size);
        let sentinel = PointerSample::default().ndc;
        Self {
            camera: Camera::new(viewport.aspect()),
            controls: OrbitControls::default(),
            plane: ReferencePlane::new(params.plane_size),
            field,
            pointer: PointerSample::default(),
            strength: DisplacementStrength::new(params.strength_ceiling, params.strength_decay),
            heatmap,
            glow: GlowSprite::default(),
            canvas_coord: sentinel,
            overlay_visible: false,
            drag_origin: None,
            queue: SmallVec::new(),
            pending_image: None,
            pending_resize: None,
            frame: 0,
            viewport,
            params,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Apply one event immediately. Returns true if it was a pointer move.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerMove { x, y } => {
                if let Some(origin) = self.drag_origin {
                    let pos = Vec2::new(x, y);
                    let d = pos - origin;
                    self.controls
                        .rotate_by_pixels(d.x, d.y, self.viewport.height);
                    self.drag_origin = Some(pos);
                }
                self.pointer = PointerSample::from_screen(x, y, &self.viewport);
                true
            }
            InputEvent::DragStart { x, y } => {
                self.drag_origin = Some(Vec2::new(x, y));
                false
            }
            InputEvent::DragEnd => {
                self.drag_origin = None;
                false
            }
            InputEvent::Wheel { delta_y } => {
                self.controls.dolly(delta_y);
                false
            }
            InputEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => {
                self.resize(width, height, pixel_ratio);
                false
            }
            InputEvent::Key(key) => {
                if key.eq_ignore_ascii_case("h") {
                    self.overlay_visible = !self.overlay_visible;
                    log::info!("[session] heat-map overlay: {}", self.overlay_visible);
                }
                false
            }
            InputEvent::ImageLoaded(image) => {
                log::info!(
                    "[session] new picture {}x{}",
                    image.width(),
                    image.height()
                );
                self.pending_image = Some(*image);
                false
            }
        }
    }

    /// Viewport, camera aspect and surface size change together.
    fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        self.viewport = ViewportState::new(width, height, pixel_ratio);
        self.camera.set_aspect(self.viewport.aspect());
        self.pending_resize = Some(self.viewport.physical_size());
    }

    /// One frame: drain input, move the camera, update the heat-map and
    /// make the single boost-or-decay decision for the strength.
    pub fn tick(&mut self) -> FrameOutput {
        let mut moved = false;
        let events = std::mem::take(&mut self.queue);
        for event in events {
            moved |= self.apply(event);
        }

        self.controls.update(&mut self.camera);
        self.heatmap.fade(self.params.fade_alpha);

        let hit = self.pick();
        if let Some(hit) = hit {
            self.canvas_coord =
                hit.raster_coord(self.heatmap.width() as f32, self.heatmap.height() as f32);
        }
        self.strength.apply(moved && hit.is_some());

        let glow_size = self.heatmap.width() as f32 * self.params.glow_size_fraction;
        self.heatmap
            .draw_glow(&self.glow, self.canvas_coord, glow_size);

        self.frame += 1;
        FrameOutput {
            resolution: self.viewport.resolution(),
            strength: self.strength.value(),
            heatmap_dirty: self.heatmap.take_dirty(),
            image: self.pending_image.take(),
            overlay_visible: self.overlay_visible,
            resized: self.pending_resize.take(),
        }
    }

    pub fn pick(&self) -> Option<PickHit> {
        self.plane.pick(&self.camera, &self.pointer)
    }

    pub fn params(&self) -> &MeltParams {
        &self.params
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerSample {
        &self.pointer
    }

    pub fn strength(&self) -> f32 {
        self.strength.value()
    }

    pub fn heatmap(&self) -> &HeatMap {
        &self.heatmap
    }

    /// Current glow position in heat-map pixels.
    pub fn canvas_coord(&self) -> Vec2 {
        self.canvas_coord
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn set_glow(&mut self, glow: GlowSprite) {
        self.glow = glow;
    }
}
