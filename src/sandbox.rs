// filepath: src/sandbox.rs
//! Sandbox lifecycle
//!
//! `Sandbox` owns the pixel surface for the session and wires it to the path
//! renderer, the inspector and the routine registry. Hosts drive it through
//! `reset`, `run` and `handle_pointer`.

use std::rc::Rc;

use log::{debug, info, warn};

use crate::color::Color;
use crate::config::SandboxConfig;
use crate::coords::CoordinateMapper;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::draw::DrawingSurface;
use crate::path::PathRenderer;
use crate::pointer::{Inspector, PointerEvent, Reading};
use crate::routine::{DrawContext, Routine, RoutineRegistry};
use crate::surface::PixelSurface;

pub struct Sandbox {
    surface: PixelSurface,
    renderer: PathRenderer,
    mapper: CoordinateMapper,
    inspector: Inspector,
    registry: RoutineRegistry,
    config: SandboxConfig,
    diagnostics: Rc<dyn DiagnosticSink>,
}

impl Sandbox {
    /// Build a sandbox over `backend`, painting it with the configured fill.
    pub fn new(
        config: SandboxConfig,
        backend: Box<dyn DrawingSurface>,
        diagnostics: Rc<dyn DiagnosticSink>,
    ) -> Self {
        let resolved = config.surface();
        let surface = PixelSurface::new(backend, resolved.background_color, diagnostics.clone());
        info!(
            "Sandbox surface {}x{}, routine '{}'",
            surface.width(),
            surface.height(),
            config.routine
        );

        let registry = RoutineRegistry::with_builtins();
        if !registry.contains(&config.routine) {
            warn!("Configured routine '{}' is not registered", config.routine);
        }

        Self {
            surface,
            renderer: PathRenderer::new(config.poly_style),
            mapper: config.mapper(),
            inspector: Inspector::new(),
            registry,
            config,
            diagnostics,
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn registry(&self) -> &RoutineRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RoutineRegistry {
        &mut self.registry
    }

    pub fn active_routine(&self) -> &str {
        &self.config.routine
    }

    pub fn set_active_routine(&mut self, id: &str) {
        self.config.routine = id.to_string();
    }

    /// Clear the surface back to its startup fill
    pub fn reset(&mut self) {
        self.surface.reset();
        self.diagnostics.report(Diagnostic::Reset);
    }

    /// Create the active routine and run it once against the surface.
    ///
    /// Errors from the routine are handed back unchanged.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let id = self.config.routine.clone();
        self.diagnostics.report(Diagnostic::Run {
            routine: id.clone(),
        });
        let mut routine = self.registry.create(&id, &self.config.routines)?;
        self.execute(routine.as_mut())
    }

    /// Run a caller-supplied routine once against the surface.
    pub fn run_routine(
        &mut self,
        routine: &mut dyn Routine,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.diagnostics.report(Diagnostic::Run {
            routine: routine.id().to_string(),
        });
        self.execute(routine)
    }

    fn execute(&mut self, routine: &mut dyn Routine) -> Result<(), Box<dyn std::error::Error>> {
        debug!("Running routine {}", routine.name());
        let mut ctx = DrawContext::new(&mut self.surface, &self.renderer);
        routine.main(&mut ctx)
    }

    /// Route a pointer event to the inspector
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<Reading> {
        self.inspector
            .handle_event(event, &self.mapper, &self.surface)
    }

    /// Read a surface pixel directly
    pub fn inspect(&self, x: i32, y: i32) -> Color {
        self.surface.get_pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::Sandbox;
    use crate::color::Color;
    use crate::config::SandboxConfig;
    use crate::diagnostics::{CollectingSink, Diagnostic};
    use crate::draw::RasterSurface;
    use crate::error::DrawError;
    use crate::pointer::{PointerEvent, PointerEventKind};
    use crate::routine::{DrawContext, Routine};
    use std::rc::Rc;

    struct Failing;

    impl Routine for Failing {
        fn id(&self) -> &str {
            "failing"
        }
        fn name(&self) -> &str {
            "Failing"
        }
        fn main(&mut self, ctx: &mut DrawContext) -> Result<(), Box<dyn std::error::Error>> {
            ctx.set_pixel(0, 0, Color::from_hex(0xffffff));
            Err("boom".into())
        }
    }

    fn failing() -> Box<dyn Routine> {
        Box::new(Failing)
    }

    fn sandbox() -> (Sandbox, Rc<CollectingSink>) {
        let sink = Rc::new(CollectingSink::new());
        let sandbox = Sandbox::new(
            SandboxConfig::default(),
            Box::new(RasterSurface::new(320, 240)),
            sink.clone(),
        );
        (sandbox, sink)
    }

    #[test]
    fn run_draws_default_polygon_and_reset_clears_it() {
        let (mut sandbox, sink) = sandbox();
        sandbox.run().unwrap();
        assert_ne!(sandbox.inspect(80, 80), Color::BLACK);

        sandbox.reset();
        for y in (0..240).step_by(7) {
            for x in (0..320).step_by(7) {
                assert_eq!(sandbox.inspect(x, y), Color::BLACK);
            }
        }
        assert_eq!(
            sink.entries(),
            vec![
                Diagnostic::Run {
                    routine: "polygon".into()
                },
                Diagnostic::Reset
            ]
        );
    }

    #[test]
    fn unknown_routine_fails_run_without_drawing() {
        let (mut sandbox, _) = sandbox();
        sandbox.set_active_routine("nope");
        let err = sandbox.run().unwrap_err();
        assert_eq!(
            err.downcast_ref::<DrawError>(),
            Some(&DrawError::UnknownRoutine("nope".into()))
        );
        assert_eq!(sandbox.inspect(80, 80), Color::BLACK);
    }

    #[test]
    fn routine_errors_propagate_and_sandbox_keeps_working() {
        let (mut sandbox, _) = sandbox();
        sandbox.registry_mut().register("failing", failing);
        sandbox.set_active_routine("failing");
        assert_eq!(sandbox.run().unwrap_err().to_string(), "boom");
        // drawing done before the failure stays
        assert_eq!(sandbox.inspect(0, 0), Color::from_hex(0xffffff));

        sandbox.reset();
        sandbox.set_active_routine("polygon");
        assert!(sandbox.run().is_ok());
    }

    #[test]
    fn run_routine_uses_caller_instance() {
        let (mut sandbox, sink) = sandbox();
        let mut routine = Failing;
        assert!(sandbox.run_routine(&mut routine).is_err());
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::Run {
                routine: "failing".into()
            }]
        );
    }

    #[test]
    fn pointer_events_reach_inspector() {
        let (mut sandbox, _) = sandbox();
        sandbox.run().unwrap();
        sandbox.handle_pointer(&PointerEvent::new(PointerEventKind::Enter, 0.0, 0.0));
        let reading = sandbox
            .handle_pointer(&PointerEvent::new(PointerEventKind::Motion, 321.0, 322.0))
            .unwrap();
        assert!(sandbox.inspector().is_visible());
        assert_eq!((reading.x, reading.y), (80, 80));
        assert_eq!(reading.hex, "#800000");
    }
}
