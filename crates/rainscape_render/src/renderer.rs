//! Two-pass scene renderer
//!
//! Per frame:
//! 1. derive the light direction and light-space transform once
//! 2. upload frame, object, sky and rain data
//! 3. shadow pass: every mesh, depth only, from the light
//! 4. lit pass: skybox, then meshes sampling the shadow map, then rain
//!
//! The draw order in the lit pass (background, opaque, overlay) is required
//! for correct compositing.

use glam::{Mat4, Vec3};
use rainscape_core::{LightState, RainVertex, Scene, SpotLight, Toggles, Transform};

use crate::mesh::GpuMesh;
use crate::pipeline::{
    create_depth_view, object_bind_group_layout, FrameUniforms, ObjectUniforms, RainPipeline,
    ScenePipeline, ShadowPipeline, SkyboxPipeline, MAX_SPOTLIGHTS,
};
use crate::shadow::{ShadowPass, ShadowSettings};
use crate::skybox::CubeFaces;

/// Fixed renderer configuration
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub shadow: ShadowSettings,
    /// Clear colour of the lit pass (hidden behind the skybox)
    pub clear_color: [f32; 3],
    pub spotlights: Vec<SpotLight>,
    /// Vertex capacity of the rain buffer
    pub rain_max_vertices: usize,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            shadow: ShadowSettings::default(),
            clear_color: [0.7, 0.7, 0.7],
            spotlights: vec![SpotLight::default()],
            rain_max_vertices: 3000,
        }
    }
}

/// Everything the renderer reads from the frame state
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub view: Mat4,
    pub projection: Mat4,
    pub light: LightState,
    pub light_color: Vec3,
    /// Orbit angle (degrees) added to spinning objects
    pub object_angle: f32,
    pub toggles: Toggles,
    pub rain: &'a [RainVertex],
}

/// A scene object ready to draw
struct Drawable {
    mesh: GpuMesh,
    transform: Transform,
    spins: bool,
}

impl Drawable {
    fn model_matrix(&self, object_angle: f32) -> Mat4 {
        let extra = if self.spins { object_angle } else { 0.0 };
        self.transform.model_matrix(extra)
    }
}

/// Owns every pipeline and GPU resource of the two passes
pub struct SceneRenderer {
    shadow: ShadowPass,
    shadow_pipeline: ShadowPipeline,
    scene_pipeline: ScenePipeline,
    skybox: SkyboxPipeline,
    rain: RainPipeline,
    objects: Vec<Drawable>,
    depth_view: wgpu::TextureView,
    settings: RendererSettings,
    wireframe_warned: bool,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        size: (u32, u32),
        scene: &Scene,
        skyboxes: (&CubeFaces, &CubeFaces),
        settings: RendererSettings,
    ) -> Self {
        if settings.spotlights.len() > MAX_SPOTLIGHTS {
            log::warn!(
                "{} spotlights configured, only the first {} are used",
                settings.spotlights.len(),
                MAX_SPOTLIGHTS
            );
        }

        let object_layout = object_bind_group_layout(device);
        let shadow = ShadowPass::new(device, settings.shadow);
        let shadow_pipeline = ShadowPipeline::new(device, &object_layout);
        let scene_pipeline = ScenePipeline::new(device, surface_format, &object_layout, &shadow);
        let (day, night) = skyboxes;
        let skybox = SkyboxPipeline::new(device, queue, surface_format, day, night);
        let rain = RainPipeline::new(device, surface_format, settings.rain_max_vertices);

        let objects: Vec<Drawable> = scene
            .objects
            .iter()
            .map(|object| Drawable {
                mesh: GpuMesh::upload(
                    device,
                    &object_layout,
                    &object.name,
                    &object.mesh.build(object.color),
                ),
                transform: object.transform,
                spins: object.spins,
            })
            .collect();

        log::info!(
            "Scene '{}' uploaded: {} objects ({} spinning)",
            scene.name,
            objects.len(),
            objects.iter().filter(|o| o.spins).count()
        );

        Self {
            shadow,
            shadow_pipeline,
            scene_pipeline,
            skybox,
            rain,
            objects,
            depth_view: create_depth_view(device, size.0, size.1),
            settings,
            wireframe_warned: false,
        }
    }

    /// Recreate the main depth target; the shadow map keeps its size
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = create_depth_view(device, width, height);
    }

    /// Record both passes for one frame into `encoder`
    pub fn render(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: &FrameView<'_>,
    ) {
        let light_direction = frame.light.direction();
        let light_space = self.shadow.transform(light_direction);

        let uniforms = FrameUniforms {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            light_space: light_space.to_cols_array_2d(),
            light_dir: frame.light.view_space_direction(frame.view).to_array(),
            light_color: frame.light_color.to_array(),
            shadow_bias: self.shadow.settings().depth_bias,
            ..FrameUniforms::default()
        }
        .with_spotlights(&self.settings.spotlights, frame.view);

        self.scene_pipeline.update(queue, &uniforms);
        self.shadow_pipeline.update(queue, light_space);
        self.skybox.update(queue, frame.view, frame.projection);
        self.rain.upload(queue, frame.projection * frame.view, frame.rain);
        for object in &self.objects {
            let model = object.model_matrix(frame.object_angle);
            object
                .mesh
                .write_uniforms(queue, &ObjectUniforms::new(model, frame.view));
        }

        // Depth from the light; must precede the lit pass that samples it
        let objects = &self.objects;
        let shadow_pipeline = &self.shadow_pipeline;
        self.shadow.render(encoder, |pass| {
            shadow_pipeline.bind(pass);
            for object in objects {
                object.mesh.draw(pass);
            }
        });

        let wireframe = frame.toggles.is_wireframe();
        if wireframe && !self.scene_pipeline.has_wireframe() && !self.wireframe_warned {
            log::warn!("Wireframe requested but unsupported by this device; drawing filled");
            self.wireframe_warned = true;
        }

        let [r, g, b] = self.settings.clear_color;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.skybox.draw(&mut pass, frame.toggles.skybox());

        self.scene_pipeline.bind(&mut pass, wireframe);
        for object in &self.objects {
            object.mesh.draw(&mut pass);
        }

        self.rain.draw(&mut pass);
    }
}
