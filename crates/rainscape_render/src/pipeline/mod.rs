//! Render pipelines
//!
//! One pipeline per kind of draw: depth-only meshes from the light, the lit
//! mesh pass, the background skybox and the rain lines. The lit and depth
//! pipelines share the per-object bind group layout so every mesh has a
//! single uniform buffer used by both passes.

pub mod rain_pipeline;
pub mod scene_pipeline;
pub mod shadow_pipeline;
pub mod skybox_pipeline;
pub mod types;

pub use rain_pipeline::RainPipeline;
pub use scene_pipeline::ScenePipeline;
pub use shadow_pipeline::ShadowPipeline;
pub use skybox_pipeline::{sky_view_projection, SkyboxPipeline, SKYBOX_VERTICES};
pub use types::{FrameUniforms, MatrixUniform, ObjectUniforms, SpotLightUniform, MAX_SPOTLIGHTS};

use rainscape_core::MeshVertex;

/// Depth format of the main pass
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Layout entry for a uniform buffer
pub(crate) fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Group 1 layout of both mesh pipelines: [`ObjectUniforms`]
pub fn object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Bind Group Layout"),
        entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    })
}

/// Vertex buffer layout for [`MeshVertex`]
pub fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // normal: vec3<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            // color: vec3<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 24,
                shader_location: 2,
            },
        ],
    }
}

/// Create the depth target for the main pass
pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_vertex_layout_stride() {
        let layout = mesh_vertex_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<MeshVertex>() as u64);
        assert_eq!(layout.array_stride, 36);
    }

    #[test]
    fn test_mesh_vertex_attribute_offsets() {
        let layout = mesh_vertex_layout();
        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
    }
}
