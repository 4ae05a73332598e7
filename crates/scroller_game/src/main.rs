//! Scroller -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`; all simulation
//! runs inside `RedrawRequested` on a fixed-timestep accumulator
//! (`TickClock`), one consumed step per integer tick. The frame order is
//! fixed: winit drains window events before the redraw, movement runs in
//! the fixed steps, the camera is recomputed from the final player
//! position, and only then is the scene rendered back-to-front
//! (background, player, enemy).
//!
//! Startup either loads the complete four-texture asset set or exits the
//! event loop before the first tick with the failing asset in the log;
//! either way teardown runs and the process exits cleanly.

mod assets;
mod clips;
mod enemy;
mod mover;
mod player;
#[cfg(test)]
mod script;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::{load_scene_textures, AssetError, GpuSpriteTexture, SceneTextures};
use clips::ClipRect;
use enemy::{Enemy, PatrolBand};
use player::Player;
use scroller_core::geom::{follow_camera, LevelBounds};
use scroller_core::input::{InputState, Key};
use scroller_core::time::TickClock;
use scroller_core::walk::{Facing, WalkCycle};
use scroller_platform::window::PlatformConfig;
use scroller_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};

pub const LEVEL_WIDTH: i32 = 1513;
pub const LEVEL_HEIGHT: i32 = 480;
pub const LEVEL_BOUNDS: LevelBounds = LevelBounds {
    width: LEVEL_WIDTH,
    height: LEVEL_HEIGHT,
};

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;

/// Level row the characters walk on.
pub const GROUND_Y: i32 = 390;
pub const ENEMY_SPAWN_Y: i32 = GROUND_Y - 4;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// The asset set carries no enemy sheet, so the enemy draws as a tinted
/// quad over a 1x1 texture.
const ENEMY_TINT: [f32; 4] = [0.75, 0.16, 0.16, 1.0];

/// Which bind group a batch of quads samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextureSlot {
    Background,
    WalkRight,
    WalkLeft,
    Standing,
    EnemyTint,
}

/// A contiguous run of indices drawn with one texture binding.
/// Consecutive quads sharing a slot merge into a single call.
#[derive(Debug, Clone, Copy)]
struct DrawCall {
    slot: TextureSlot,
    index_start: u32,
    index_count: u32,
}

struct QuadSpec {
    slot: TextureSlot,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    uv: [f32; 4],
    color: [f32; 4],
}

/// All mutable game state. Constructed lazily in
/// `ApplicationHandler::resumed` once the window and GPU surface exist.
struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TickClock,
    input: InputState,
    camera: Camera2D,
    sprite_pipeline: SpritePipeline,

    textures: SceneTextures,
    enemy_tint: GpuSpriteTexture,

    player: Player,
    enemy: Enemy,
    walk_right: WalkCycle,
    walk_left: WalkCycle,

    // Per-frame GPU mesh state: the quads are rebuilt on the CPU each
    // frame and streamed into these buffers. Buffers grow (power-of-two)
    // but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
}

impl GameState {
    fn new(window: Arc<Window>) -> Result<Self, AssetError> {
        let gpu = GpuContext::new(window.clone());
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format());

        let textures = load_scene_textures(&gpu, &sprite_pipeline)?;

        let tint_texture = Texture::from_rgba8(
            &gpu.device,
            &gpu.queue,
            &[255, 255, 255, 255],
            1,
            1,
            "enemy_tint",
        );
        let tint_bind_group =
            sprite_pipeline.create_texture_bind_group(&gpu.device, &tint_texture);
        let enemy_tint = GpuSpriteTexture {
            texture: tint_texture,
            bind_group: tint_bind_group,
        };

        let player = Player::new(0, GROUND_Y, LEVEL_BOUNDS);
        let enemy = Enemy::new(PatrolBand::default(), ENEMY_SPAWN_Y);
        let camera = Camera2D::new(SCREEN_WIDTH, SCREEN_HEIGHT);

        let camera_uniform = camera.build_uniform();
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        let mut state = Self {
            window,
            gpu,
            time: TickClock::new(),
            input: InputState::new(),
            camera,
            sprite_pipeline,
            textures,
            enemy_tint,
            player,
            enemy,
            walk_right: WalkCycle::new(),
            walk_left: WalkCycle::new(),
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
        };
        state.rebuild_scene_mesh();
        Ok(state)
    }

    fn facing(&self) -> Facing {
        Facing::from_held(
            self.input.is_held(Key::Right),
            self.input.is_held(Key::Left),
        )
    }

    /// One fixed simulation tick: walk counters, player move, enemy move.
    fn step(&mut self) {
        match self.facing() {
            Facing::Right => self.walk_right.advance(),
            Facing::Left => self.walk_left.advance(),
            Facing::Standing => {}
        }

        self.player.tick();
        self.enemy.tick(self.player.bounding_box());
    }

    fn rebuild_scene_mesh(&mut self) {
        let (vertices, indices, draw_calls) = self.build_mesh();
        self.ensure_mesh_capacity(vertices.len(), indices.len());
        self.draw_calls = draw_calls;

        self.gpu
            .queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.gpu
            .queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));
    }

    fn build_mesh(&self) -> (Vec<SpriteVertex>, Vec<u32>, Vec<DrawCall>) {
        let mut vertices = Vec::with_capacity(3 * 4);
        let mut indices = Vec::with_capacity(3 * 6);
        let mut draw_calls = Vec::with_capacity(3);

        // Background spans the level from the origin; the camera crops it
        // to the visible window.
        let background_size = self.textures.background.texture.size;
        push_quad(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            QuadSpec {
                slot: TextureSlot::Background,
                x: 0,
                y: 0,
                w: background_size.0 as i32,
                h: background_size.1 as i32,
                uv: [0.0, 0.0, 1.0, 1.0],
                color: WHITE,
            },
        );

        // Player quad sized by the selected clip. The bounding box stays
        // 30x50 regardless; the visible frame is whatever the sheet says.
        let facing = self.facing();
        let (slot, sheet, frame) = match facing {
            Facing::Right => (
                TextureSlot::WalkRight,
                &self.textures.walk_right,
                self.walk_right.frame(),
            ),
            Facing::Left => (
                TextureSlot::WalkLeft,
                &self.textures.walk_left,
                self.walk_left.frame(),
            ),
            Facing::Standing => (TextureSlot::Standing, &self.textures.standing, 0),
        };
        let clip: ClipRect = clips::clip_for(facing, frame);
        push_quad(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            QuadSpec {
                slot,
                x: self.player.body.pos_x,
                y: self.player.body.pos_y,
                w: clip.w as i32,
                h: clip.h as i32,
                uv: clips::uv_rect(clip, sheet.texture.size),
                color: WHITE,
            },
        );

        let enemy_box = self.enemy.bounding_box();
        push_quad(
            &mut vertices,
            &mut indices,
            &mut draw_calls,
            QuadSpec {
                slot: TextureSlot::EnemyTint,
                x: enemy_box.x,
                y: enemy_box.y,
                w: enemy_box.w,
                h: enemy_box.h,
                uv: [0.0, 0.0, 1.0, 1.0],
                color: ENEMY_TINT,
            },
        );

        (vertices, indices, draw_calls)
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn bind_group_for(&self, slot: TextureSlot) -> &wgpu::BindGroup {
        match slot {
            TextureSlot::Background => &self.textures.background.bind_group,
            TextureSlot::WalkRight => &self.textures.walk_right.bind_group,
            TextureSlot::WalkLeft => &self.textures.walk_left.bind_group,
            TextureSlot::Standing => &self.textures.standing.bind_group,
            TextureSlot::EnemyTint => &self.enemy_tint.bind_group,
        }
    }

    fn render_frame(&mut self) {
        let camera_uniform = self.camera.build_uniform();
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );

        let Some(frame) = self.gpu.acquire_frame() else {
            return;
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let mut bound_slot: Option<TextureSlot> = None;
            for draw in &self.draw_calls {
                if bound_slot != Some(draw.slot) {
                    render_pass.set_bind_group(1, self.bind_group_for(draw.slot), &[]);
                    bound_slot = Some(draw.slot);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.texture.present();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self {
            config: PlatformConfig {
                title: "Scroller".to_string(),
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
                resizable: false,
            },
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window = scroller_platform::window::create_window(event_loop, &self.config);
        log::info!(
            "Window created: {}x{}",
            self.config.width,
            self.config.height
        );

        match GameState::new(window) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                // No partial startup: skip the main loop and go straight
                // to teardown. The process still exits with status 0.
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "Close requested, exiting after {} ticks.",
                    state.time.ticks_total
                );
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                // The window itself is not resizable, but scale-factor
                // changes still resize the surface. The camera keeps its
                // fixed level-space viewport.
                state.gpu.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        state
                            .player
                            .handle_key(&mut state.input, key, event.state.is_pressed());
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let surface_size = state.gpu.size();
                if surface_size.0 == 0 || surface_size.1 == 0 {
                    return;
                }

                state.time.begin_frame();
                while state.time.try_tick() {
                    state.step();
                }

                // Camera follows the player: pure function of the final
                // position, recomputed every frame, clamped to the level.
                state.camera.origin = follow_camera(
                    state.player.bounding_box(),
                    (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32),
                    (LEVEL_WIDTH, LEVEL_HEIGHT),
                );

                state.rebuild_scene_mesh();
                state.render_frame();
            }

            _ => {}
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Scene Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Append one textured quad. `(x, y)` is the top-left corner in level
/// space; v-coordinates follow level y straight down, so no flip is
/// needed between the clip table and the sheet.
fn push_quad(
    vertices: &mut Vec<SpriteVertex>,
    indices: &mut Vec<u32>,
    draw_calls: &mut Vec<DrawCall>,
    spec: QuadSpec,
) {
    let (x0, y0) = (spec.x as f32, spec.y as f32);
    let (x1, y1) = (x0 + spec.w as f32, y0 + spec.h as f32);
    let [u0, v0, u1, v1] = spec.uv;
    let base_index = vertices.len() as u32;

    vertices.push(SpriteVertex {
        position: [x0, y0],
        tex_coords: [u0, v0],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x1, y0],
        tex_coords: [u1, v0],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x1, y1],
        tex_coords: [u1, v1],
        color: spec.color,
    });
    vertices.push(SpriteVertex {
        position: [x0, y1],
        tex_coords: [u0, v1],
        color: spec.color,
    });

    let draw_start = indices.len() as u32;
    indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(draw_calls, spec.slot, draw_start, 6);
}

/// Append a draw call, merging with the previous one when the texture
/// slot matches and the index range is contiguous.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    slot: TextureSlot,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.slot == slot && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        slot,
        index_start,
        index_count,
    });
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Scroller starting...");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
