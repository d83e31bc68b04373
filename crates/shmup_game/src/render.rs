//! Render step.
//!
//! Each frame the CPU builds one quad per live entity straight from its render
//! rect (pixel space, top-left origin) and the UVs of its current atlas frame, then
//! streams the mesh into GPU buffers and draws it over an opaque black clear. The
//! ship is emitted first and the bolts after it in pool order, so consecutive quads
//! that share a sheet collapse into a single draw call.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use shmup_render::{Camera2D, GpuContext, SpritePipeline, SpriteVertex, Texture};

use crate::atlas::SpriteSheet;
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::StartupError;
use crate::state::GameState;

/// A contiguous run of indices drawn from one sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub sheet: SpriteSheet,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct SpriteMesh {
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

/// Build the frame's mesh. `sheet_size` reports the pixel size of each loaded
/// sheet so frame rects can be turned into UVs.
pub fn build_mesh(state: &GameState, sheet_size: impl Fn(SpriteSheet) -> (u32, u32)) -> SpriteMesh {
    let quad_estimate = 1 + state.projectiles.len();
    let mut mesh = SpriteMesh {
        vertices: Vec::with_capacity(quad_estimate * 4),
        indices: Vec::with_capacity(quad_estimate * 6),
        draw_calls: Vec::with_capacity(SpriteSheet::ALL.len()),
    };

    add_entity_quad(&mut mesh, &state.ship.body, &sheet_size);
    for projectile in state.projectiles.iter() {
        add_entity_quad(&mut mesh, projectile, &sheet_size);
    }
    mesh
}

fn add_entity_quad(
    mesh: &mut SpriteMesh,
    entity: &Entity,
    sheet_size: &impl Fn(SpriteSheet) -> (u32, u32),
) {
    let sheet = entity.sprite.sheet;
    let (tw, th) = sheet_size(sheet);
    let [u0, v0, u1, v1] = entity.sprite.rect().uv(tw, th);

    let rect = entity.render_rect;
    let left = rect.x as f32;
    let top = rect.y as f32;
    let right = (rect.x + rect.w) as f32;
    let bottom = (rect.y + rect.h) as f32;

    let base_index = mesh.vertices.len() as u32;
    mesh.vertices.extend_from_slice(&[
        SpriteVertex {
            position: [left, top],
            tex_coords: [u0, v0],
        },
        SpriteVertex {
            position: [right, top],
            tex_coords: [u1, v0],
        },
        SpriteVertex {
            position: [right, bottom],
            tex_coords: [u1, v1],
        },
        SpriteVertex {
            position: [left, bottom],
            tex_coords: [u0, v1],
        },
    ]);

    let draw_start = mesh.indices.len() as u32;
    mesh.indices.extend_from_slice(&[
        base_index,
        base_index + 1,
        base_index + 2,
        base_index,
        base_index + 2,
        base_index + 3,
    ]);

    push_draw_call(&mut mesh.draw_calls, sheet, draw_start, 6);
}

/// Append a draw call, merging with the previous one when the sheet matches and
/// the indices are contiguous.
fn push_draw_call(
    draw_calls: &mut Vec<DrawCall>,
    sheet: SpriteSheet,
    index_start: u32,
    index_count: u32,
) {
    if let Some(last) = draw_calls.last_mut() {
        let contiguous = last.index_start + last.index_count == index_start;
        if last.sheet == sheet && contiguous {
            last.index_count += index_count;
            return;
        }
    }
    draw_calls.push(DrawCall {
        sheet,
        index_start,
        index_count,
    });
}

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU side of the render step. Owns the pipeline, both sprite sheets and the
/// streaming mesh buffers; dropping it releases all of them.
pub struct SceneRenderer {
    sprite_pipeline: SpritePipeline,
    textures: HashMap<SpriteSheet, GpuSpriteTexture>,
    camera: Camera2D,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    // Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    draw_calls: Vec<DrawCall>,
}

impl SceneRenderer {
    pub fn new(gpu: &GpuContext, config: &GameConfig) -> Result<Self, StartupError> {
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);

        let mut textures = HashMap::new();
        for sheet in SpriteSheet::ALL {
            let texture = load_sheet_texture(gpu, &sprite_pipeline, sheet, sheet_path(config, sheet))?;
            textures.insert(sheet, texture);
        }

        // The playfield is a fixed logical size; the surface may be larger on
        // high-DPI displays and the projection scales it up.
        let camera = Camera2D::new(config.screen_width, config.screen_height);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let mut renderer = Self {
            sprite_pipeline,
            textures,
            camera,
            camera_buffer,
            camera_bind_group,
            vertex_buffer: create_vertex_buffer(&gpu.device, 1),
            index_buffer: create_index_buffer(&gpu.device, 1),
            mesh_vertex_capacity: 0,
            mesh_index_capacity: 0,
            draw_calls: Vec::new(),
        };
        renderer.ensure_mesh_capacity(&gpu.device, 4, 6);
        Ok(renderer)
    }

    fn sheet_size(&self, sheet: SpriteSheet) -> (u32, u32) {
        self.textures
            .get(&sheet)
            .map(|t| t.texture.size)
            .unwrap_or_else(|| sheet.expected_size())
    }

    /// Clear, blit the ship, blit every live bolt, present.
    pub fn render(&mut self, gpu: &GpuContext, state: &GameState) {
        let mesh = build_mesh(state, |sheet| self.sheet_size(sheet));
        self.ensure_mesh_capacity(&gpu.device, mesh.vertices.len(), mesh.indices.len());
        gpu.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        gpu.queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );
        self.draw_calls = mesh.draw_calls;

        let Some((output, view)) = gpu.begin_frame() else {
            return;
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            for draw in &self.draw_calls {
                if let Some(texture) = self.textures.get(&draw.sheet) {
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    render_pass.draw_indexed(
                        draw.index_start..(draw.index_start + draw.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn ensure_mesh_capacity(&mut self, device: &wgpu::Device, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(device, self.mesh_index_capacity);
        }
    }
}

fn sheet_path(config: &GameConfig, sheet: SpriteSheet) -> &str {
    match sheet {
        SpriteSheet::Ship => &config.ship_texture,
        SpriteSheet::Projectile => &config.projectile_texture,
    }
}

fn load_sheet_texture(
    gpu: &GpuContext,
    pipeline: &SpritePipeline,
    sheet: SpriteSheet,
    path: &str,
) -> Result<GpuSpriteTexture, StartupError> {
    let bytes = std::fs::read(path).map_err(|source| StartupError::AssetRead {
        path: path.to_string(),
        source,
    })?;
    let texture = Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, path)?;

    let (width, height) = texture.size;
    sheet
        .validate_texture_size(width, height)
        .map_err(|reason| StartupError::AtlasMismatch {
            path: path.to_string(),
            reason,
        })?;
    if (width, height) != sheet.expected_size() {
        let (ew, eh) = sheet.expected_size();
        log::warn!(
            "Sprite sheet '{}' is {}x{}, expected {}x{}; frames still fit, continuing",
            path,
            width,
            height,
            ew,
            eh
        );
    }

    let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
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
