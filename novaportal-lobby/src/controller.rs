use crate::animation;
use crate::scene::{AmbientScene, Camera};
use novaportal_gpu_shared::math;

/// Cancellation token for one scheduled next-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Cooperative next-frame scheduling. Each call to `schedule` arms exactly
/// one future callback; the frame loop is a chain of steps that each arm
/// the next before returning.
pub trait FrameScheduler {
    /// Arm one next-frame callback and return its cancellation token.
    fn schedule(&mut self) -> FrameHandle;

    /// Disarm a previously scheduled callback. Cancelling a handle that
    /// already fired is a no-op.
    fn cancel(&mut self, handle: FrameHandle);
}

/// The drawable target the backdrop renders onto. Dropping the
/// implementation releases its graphics resources.
pub trait RenderSurface {
    /// Resize the backing buffer to the new physical size, in place.
    fn resize(&mut self, width: u32, height: u32);

    /// Render one frame of the scene/camera pair.
    fn render(&mut self, scene: &AmbientScene, camera: &Camera) -> Result<(), String>;
}

/// Lifecycle phase. Mounting enters `Running` directly; `Stopped` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Stopped,
}

/// Drives the decorative backdrop: owns the scene, the camera, the drawable
/// surface, and the pending frame token. Exactly one controller exists per
/// mounted view; teardown is the only place its resources are released.
pub struct AmbientSceneController<S: RenderSurface, F: FrameScheduler> {
    phase: Phase,
    scene: AmbientScene,
    camera: Camera,
    surface: Option<S>,
    scheduler: F,
    pending_frame: Option<FrameHandle>,
    viewport: (u32, u32),
}

impl<S: RenderSurface, F: FrameScheduler> AmbientSceneController<S, F> {
    /// Take ownership of a freshly built scene and surface, and arm the
    /// first frame.
    pub fn mount(scene: AmbientScene, surface: S, scheduler: F, width: u32, height: u32) -> Self {
        let mut controller = Self {
            phase: Phase::Running,
            camera: Camera::new(math::aspect_ratio(width, height)),
            scene,
            surface: Some(surface),
            scheduler,
            pending_frame: None,
            viewport: (width, height),
        };
        controller.pending_frame = Some(controller.scheduler.schedule());
        controller
    }

    /// One frame step: advance the rotations, render, arm the next step.
    /// A failed render is logged and the loop keeps going; the backdrop is
    /// decoration, not product function.
    pub fn on_frame(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.pending_frame = None;

        animation::advance_frame(&mut self.scene);
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.render(&self.scene, &self.camera) {
                log::warn!("backdrop frame dropped: {e}");
            }
        }

        self.pending_frame = Some(self.scheduler.schedule());
    }

    /// Viewport resize: recompute the camera aspect and resize the surface
    /// backing buffer, synchronously and in place. The scene is untouched.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.phase != Phase::Running {
            return;
        }
        self.viewport = (width, height);
        self.camera.set_aspect(math::aspect_ratio(width, height));
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    /// Terminal teardown: cancel the pending frame so nothing renders into
    /// a released surface, then drop the surface and its graphics
    /// resources. Idempotent.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
        self.surface = None;
        self.phase = Phase::Stopped;
        log::debug!("backdrop controller stopped");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scene(&self) -> &AmbientScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }
}

impl<S: RenderSurface, F: FrameScheduler> Drop for AmbientSceneController<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SchedulerLog {
        next: u64,
        outstanding: Vec<FrameHandle>,
    }

    struct TestScheduler(Rc<RefCell<SchedulerLog>>);

    impl FrameScheduler for TestScheduler {
        fn schedule(&mut self) -> FrameHandle {
            let mut log = self.0.borrow_mut();
            log.next += 1;
            let handle = FrameHandle::new(log.next);
            log.outstanding.push(handle);
            handle
        }

        fn cancel(&mut self, handle: FrameHandle) {
            self.0.borrow_mut().outstanding.retain(|&h| h != handle);
        }
    }

    #[derive(Default)]
    struct SurfaceLog {
        renders: usize,
        resized_to: Option<(u32, u32)>,
        released: bool,
        fail_renders: bool,
    }

    struct TestSurface(Rc<RefCell<SurfaceLog>>);

    impl RenderSurface for TestSurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.0.borrow_mut().resized_to = Some((width, height));
        }

        fn render(&mut self, _scene: &AmbientScene, _camera: &Camera) -> Result<(), String> {
            let mut log = self.0.borrow_mut();
            log.renders += 1;
            if log.fail_renders {
                Err("surface lost".to_string())
            } else {
                Ok(())
            }
        }
    }

    impl Drop for TestSurface {
        fn drop(&mut self) {
            self.0.borrow_mut().released = true;
        }
    }

    type TestController = AmbientSceneController<TestSurface, TestScheduler>;

    fn mounted(
        width: u32,
        height: u32,
    ) -> (TestController, Rc<RefCell<SchedulerLog>>, Rc<RefCell<SurfaceLog>>) {
        let scheduler_log = Rc::new(RefCell::new(SchedulerLog::default()));
        let surface_log = Rc::new(RefCell::new(SurfaceLog::default()));
        let controller = AmbientSceneController::mount(
            AmbientScene::new(),
            TestSurface(surface_log.clone()),
            TestScheduler(scheduler_log.clone()),
            width,
            height,
        );
        (controller, scheduler_log, surface_log)
    }

    /// Play the host: consume the armed callback and deliver the frame.
    fn deliver_frame(controller: &mut TestController, scheduler: &Rc<RefCell<SchedulerLog>>) {
        let fired = scheduler.borrow_mut().outstanding.pop();
        assert!(fired.is_some(), "no frame was scheduled");
        controller.on_frame();
    }

    // ── mount ──

    #[test]
    fn test_mount_arms_first_frame() {
        let (controller, scheduler, _surface) = mounted(800, 600);
        assert_eq!(controller.phase(), Phase::Running);
        assert_eq!(scheduler.borrow().outstanding.len(), 1);
    }

    #[test]
    fn test_mount_sets_camera_aspect_from_viewport() {
        let (controller, _scheduler, _surface) = mounted(200, 100);
        assert_eq!(controller.camera().aspect, 2.0);
    }

    // ── on_frame ──

    #[test]
    fn test_frame_renders_and_rearms() {
        let (mut controller, scheduler, surface) = mounted(800, 600);
        deliver_frame(&mut controller, &scheduler);
        assert_eq!(surface.borrow().renders, 1);
        // The fired handle was replaced by exactly one fresh one
        assert_eq!(scheduler.borrow().outstanding.len(), 1);
        assert_eq!(scheduler.borrow().next, 2);
    }

    #[test]
    fn test_frame_advances_rotations() {
        let (mut controller, scheduler, _surface) = mounted(800, 600);
        deliver_frame(&mut controller, &scheduler);
        deliver_frame(&mut controller, &scheduler);
        assert!((controller.scene().torus.rotation_x - 0.01).abs() < 1e-6);
        assert!((controller.scene().particles.rotation_y - 0.002).abs() < 1e-6);
    }

    #[test]
    fn test_render_failure_keeps_the_loop_alive() {
        let (mut controller, scheduler, surface) = mounted(800, 600);
        surface.borrow_mut().fail_renders = true;
        deliver_frame(&mut controller, &scheduler);
        deliver_frame(&mut controller, &scheduler);
        assert_eq!(surface.borrow().renders, 2);
        assert_eq!(scheduler.borrow().outstanding.len(), 1);
    }

    // ── on_resize ──

    #[test]
    fn test_resize_updates_camera_and_surface_in_place() {
        let (mut controller, _scheduler, surface) = mounted(800, 600);
        let cloud_before = controller.scene().particles.positions.clone();
        controller.on_resize(400, 400);
        assert_eq!(controller.camera().aspect, 1.0);
        assert_eq!(controller.viewport(), (400, 400));
        assert_eq!(surface.borrow().resized_to, Some((400, 400)));
        // No scene recreation on resize
        assert_eq!(controller.scene().particles.positions, cloud_before);
    }

    #[test]
    fn test_resize_does_not_interrupt_the_loop() {
        let (mut controller, scheduler, _surface) = mounted(800, 600);
        controller.on_resize(1024, 768);
        assert_eq!(scheduler.borrow().outstanding.len(), 1);
        deliver_frame(&mut controller, &scheduler);
        assert_eq!(scheduler.borrow().outstanding.len(), 1);
    }

    // ── teardown ──

    #[test]
    fn test_teardown_cancels_pending_and_releases_surface() {
        let (mut controller, scheduler, surface) = mounted(800, 600);
        deliver_frame(&mut controller, &scheduler);
        controller.teardown();
        assert_eq!(controller.phase(), Phase::Stopped);
        assert!(scheduler.borrow().outstanding.is_empty());
        assert!(surface.borrow().released);
    }

    #[test]
    fn test_no_renders_after_teardown() {
        let (mut controller, scheduler, surface) = mounted(800, 600);
        controller.teardown();
        controller.on_frame();
        controller.on_frame();
        assert_eq!(surface.borrow().renders, 0);
        assert!(scheduler.borrow().outstanding.is_empty());
    }

    #[test]
    fn test_resize_after_teardown_is_ignored() {
        let (mut controller, _scheduler, surface) = mounted(800, 600);
        controller.teardown();
        controller.on_resize(1024, 768);
        assert_eq!(surface.borrow().resized_to, None);
        assert_eq!(controller.viewport(), (800, 600));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (mut controller, scheduler, _surface) = mounted(800, 600);
        controller.teardown();
        controller.teardown();
        assert_eq!(controller.phase(), Phase::Stopped);
        assert!(scheduler.borrow().outstanding.is_empty());
    }

    #[test]
    fn test_drop_tears_down() {
        let (controller, scheduler, surface) = mounted(800, 600);
        drop(controller);
        assert!(scheduler.borrow().outstanding.is_empty());
        assert!(surface.borrow().released);
    }
}
