//! Headless orbitcam demo.
//!
//! Drives an [`OrbitControls`] through a scripted drag, wheel, pinch and
//! animated fly-to, logging the camera pose after every frame. Run with
//! `RUST_LOG=debug` to also see gesture transitions.
//!
//! ```text
//! orbitcam [options.toml]
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use orbitcam::input::ListenerRegistry;
use orbitcam::{
    Camera, CameraHandle, InputEvent, Modifiers, MouseButton, OrbitControls,
    OrbitError, Options, SharedCamera,
};
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

fn load_options() -> Result<Options, OrbitError> {
    match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path)),
        None => Ok(Options::default()),
    }
}

/// Run `frames` frames of update plus animation at a fixed step.
fn run_frames(
    controls: &mut OrbitControls,
    camera: &Rc<RefCell<Camera>>,
    clock: &mut Instant,
    frames: usize,
) {
    for _ in 0..frames {
        *clock += FRAME;
        let animated = controls.run_animation_frame(*clock);
        let moved = controls.update(FRAME.as_secs_f32());
        if animated || moved {
            let cam = camera.borrow();
            log::info!(
                "pose {:.3} facing {:.3} (distance {:.3})",
                cam.position(),
                cam.forward(),
                controls.distance()
            );
        }
    }
}

fn run() -> Result<(), OrbitError> {
    let options = load_options()?;
    let camera = Rc::new(RefCell::new(Camera::perspective(
        Vec3::new(0.0, 5.0, 20.0),
        16.0 / 9.0,
        45.0,
    )));
    let surface = Rc::new(RefCell::new(ListenerRegistry::new(1280.0, 720.0)));
    let shared: SharedCamera = camera.clone();
    let mut controls = OrbitControls::new(shared, surface, options)?;
    let _ = controls.subscribe(|event| log::debug!("control event: {event:?}"));
    let mut clock = Instant::now();

    log::info!("drag to orbit");
    let _ = controls.handle_event(&InputEvent::PointerDown {
        button: MouseButton::Left,
        x: 640.0,
        y: 360.0,
        modifiers: Modifiers::NONE,
    });
    for step in 1..=10 {
        let _ = controls.handle_event(&InputEvent::PointerMove {
            x: 640.0 + 12.0 * step as f32,
            y: 360.0,
        });
        run_frames(&mut controls, &camera, &mut clock, 1);
    }
    let _ = controls.handle_event(&InputEvent::PointerUp { x: 760.0, y: 360.0 });
    run_frames(&mut controls, &camera, &mut clock, 30);

    log::info!("scroll to dolly in");
    for _ in 0..5 {
        let _ = controls.handle_event(&InputEvent::Wheel { delta: -1.0 });
    }
    run_frames(&mut controls, &camera, &mut clock, 30);

    log::info!("pinch to dolly out");
    let _ = controls.handle_event(&InputEvent::TouchStart {
        touches: vec![Vec2::new(600.0, 360.0), Vec2::new(680.0, 360.0)],
    });
    let _ = controls.handle_event(&InputEvent::TouchMove {
        touches: vec![Vec2::new(560.0, 360.0), Vec2::new(720.0, 360.0)],
    });
    let _ = controls.handle_event(&InputEvent::TouchEnd { touches: vec![] });
    run_frames(&mut controls, &camera, &mut clock, 30);

    log::info!("fly to an overview");
    controls.animate_to_at(
        Vec3::new(15.0, 15.0, 15.0),
        Vec3::ZERO,
        Duration::from_millis(500),
        clock,
    );
    while controls.has_pending_frame() {
        run_frames(&mut controls, &camera, &mut clock, 1);
    }

    controls.dispose();
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
