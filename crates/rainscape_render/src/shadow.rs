//! Directional shadow mapping
//!
//! The light is treated as a camera sitting at the light direction vector and
//! looking at the origin through a small fixed orthographic frustum. Objects
//! outside that frustum cast no shadow.

use glam::{Mat4, Vec3};

/// Depth format of the shadow map
pub const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Shadow map resolution and light frustum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    /// Width and height of the square depth target
    pub resolution: u32,
    pub near: f32,
    pub far: f32,
    /// Half-width of the symmetric orthographic frustum
    pub half_extent: f32,
    /// Depth bias subtracted before the shadow comparison
    pub depth_bias: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            resolution: 2048,
            near: 0.1,
            far: 6.0,
            half_extent: 1.0,
            depth_bias: 0.005,
        }
    }
}

/// World-to-light-clip transform for a directional light
///
/// Pure function of its inputs.
pub fn light_space_transform(light_direction: Vec3, settings: &ShadowSettings) -> Mat4 {
    let view = Mat4::look_at_rh(light_direction, Vec3::ZERO, Vec3::Y);
    let e = settings.half_extent;
    let projection = Mat4::orthographic_rh(-e, e, -e, e, settings.near, settings.far);
    projection * view
}

/// Off-screen depth target rendered from the light
///
/// Created once at startup with a fixed size; the contents are cleared and
/// fully rewritten every frame.
pub struct ShadowPass {
    settings: ShadowSettings,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl ShadowPass {
    pub fn new(device: &wgpu::Device, settings: ShadowSettings) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: settings.resolution,
                height: settings.resolution,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Hardware 2x2 PCF; reads outside the map are rejected in the shader
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        log::info!("Shadow map: {0}x{0} {1:?}", settings.resolution, SHADOW_FORMAT);

        Self {
            settings,
            view,
            sampler,
        }
    }

    pub fn settings(&self) -> &ShadowSettings {
        &self.settings
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    /// Light-space transform using this pass's frustum
    pub fn transform(&self, light_direction: Vec3) -> Mat4 {
        light_space_transform(light_direction, &self.settings)
    }

    /// Clear the depth target and let `draw` record depth-only draws into it
    ///
    /// The pass ends when `draw` returns, so the target is free to be sampled
    /// by any pass recorded afterwards on the same encoder.
    pub fn render<F>(&self, encoder: &mut wgpu::CommandEncoder, draw: F)
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        draw(&mut pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_is_pure() {
        let settings = ShadowSettings::default();
        let dir = Vec3::new(0.3, 1.0, 0.9);
        let a = light_space_transform(dir, &settings);
        let b = light_space_transform(dir, &settings);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn test_origin_maps_to_frustum_centre() {
        let settings = ShadowSettings::default();
        let m = light_space_transform(Vec3::new(0.0, 1.0, 1.0), &settings);
        let p = m.project_point3(Vec3::ZERO);
        assert!(p.x.abs() < EPSILON);
        assert!(p.y.abs() < EPSILON);
        // Distance sqrt(2) between near 0.1 and far 6.0
        let expected = (2f32.sqrt() - 0.1) / (6.0 - 0.1);
        assert!((p.z - expected).abs() < EPSILON);
    }

    #[test]
    fn test_frustum_edges() {
        let settings = ShadowSettings::default();
        let m = light_space_transform(Vec3::new(0.0, 1.0, 1.0), &settings);
        // Light-space right is world +X when the light sits on +Z
        let edge = m.project_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((edge.x - 1.0).abs() < EPSILON);
        let outside = m.project_point3(Vec3::new(5.0, 0.0, 0.0));
        assert!(outside.x > 1.0);
    }

    #[test]
    fn test_orbiting_light_keeps_origin_centred() {
        let settings = ShadowSettings::default();
        for degrees in [0.0f32, 45.0, 90.0, 200.0] {
            let dir = Mat4::from_rotation_y(degrees.to_radians())
                .transform_vector3(Vec3::new(0.0, 1.0, 1.0));
            let p = light_space_transform(dir, &settings).project_point3(Vec3::ZERO);
            assert!(p.x.abs() < EPSILON && p.y.abs() < EPSILON);
        }
    }
}
