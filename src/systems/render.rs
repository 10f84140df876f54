//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The two-pass scene renderer
//! - Frame acquisition, submission and presentation

use std::sync::Arc;
use rainscape_core::Scene;
use rainscape_render::{
    ContextError, CubeFaces, FrameView, RenderContext, RenderError, RendererSettings,
    SceneRenderer,
};
use winit::{dpi::PhysicalSize, window::Window};

/// Run `$body` inside a validation error scope and log what it caught
///
/// Debug builds only; release builds run the body unchanged. Errors are
/// logged with the call site and never abort the frame. Setup uses its own
/// scope in [`RenderSystem::new`], which fails instead.
macro_rules! check_gpu_errors {
    ($device:expr, $body:expr) => {{
        #[cfg(debug_assertions)]
        {
            $device.push_error_scope(wgpu::ErrorFilter::Validation);
        }
        let result = $body;
        #[cfg(debug_assertions)]
        {
            if let Some(error) = pollster::block_on($device.pop_error_scope()) {
                log::error!("GPU error at {}:{}: {}", file!(), line!(), error);
            }
        }
        result
    }};
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
}

impl RenderSystem {
    /// Create the GPU context and upload the scene
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        scene: &Scene,
        skyboxes: (&CubeFaces, &CubeFaces),
        settings: RendererSettings,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        log::info!(
            "Surface {}x{} ({:?}), wireframe {}",
            context.config.width,
            context.config.height,
            context.surface_format(),
            if context.supports_wireframe() { "available" } else { "unavailable" }
        );
        log::info!(
            "Shadow map {0}x{0}, {1} spotlight(s)",
            settings.shadow.resolution,
            settings.spotlights.len()
        );

        // Shader or pipeline validation failures abort startup in every build
        context.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let renderer = SceneRenderer::new(
            &context.device,
            &context.queue,
            context.surface_format(),
            (context.config.width, context.config.height),
            scene,
            skyboxes,
            settings,
        );
        ContextError::check_scope(pollster::block_on(context.device.pop_error_scope()))?;

        Ok(Self { context, renderer })
    }

    /// Handle window resize
    ///
    /// The main depth target follows the surface; the shadow map keeps its size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.context.resize(size);
        if size.width > 0 && size.height > 0 {
            self.renderer.resize(&self.context.device, size.width, size.height);
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }

    /// Render a single frame
    ///
    /// A lost or outdated surface is reconfigured before the error is
    /// returned, so the next frame can proceed.
    pub fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), RenderError> {
        // Minimized
        if self.context.size.width == 0 || self.context.size.height == 0 {
            return Ok(());
        }

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                let error = RenderError::from(e);
                if matches!(error, RenderError::SurfaceLost) {
                    self.context.reconfigure();
                }
                return Err(error);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        check_gpu_errors!(self.context.device, {
            let mut encoder = self
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

            self.renderer
                .render(&self.context.queue, &mut encoder, &view, frame);

            self.context.queue.submit(std::iter::once(encoder.finish()));
        });
        output.present();

        Ok(())
    }
}
