//! Pointer inspection against a chart painted by the driver

use uvdecay::chart::{ChartSurface, HitTester, PixelSurface};
use uvdecay::driver::AnimationDriver;
use uvdecay::sim::{PlasticKind, SimParams};
use uvdecay::ui::format_sample;

fn run_frames(frames: usize) -> (AnimationDriver, PixelSurface) {
    let mut surface = PixelSurface::new(600, 400);
    let mut driver = AnimationDriver::new(PlasticKind::Pp, 70, SimParams::default());
    let _ = driver.reset(&mut surface);
    for _ in 0..frames {
        let handle = driver.take_scheduled().unwrap();
        driver.tick(handle, &mut surface);
    }
    (driver, surface)
}

#[test]
fn test_pointer_on_marker_finds_latest_sample() {
    let (driver, surface) = run_frames(40);
    let layout = driver.redraw(&mut PixelSurface::new(600, 400));
    let latest = *driver.state().latest().unwrap();
    let p = layout.to_pixel(&latest);

    let hit = HitTester::default()
        .find_nearest(p.x, p.y, driver.state(), driver.material(), surface.dims())
        .unwrap();
    assert_eq!(hit, latest);

    let (time, mass) = format_sample(&hit);
    assert_eq!(time, "Time: 4.00 min");
    assert!(mass.starts_with("Mass: 9."));
}

#[test]
fn test_pointer_far_from_curve_misses() {
    let (driver, surface) = run_frames(40);
    let dims = surface.dims();

    // Bottom-right corner of the plot, well below the curve
    let hit = HitTester::default().find_nearest(
        dims.width - 15.0,
        dims.height - 35.0,
        driver.state(),
        driver.material(),
        dims,
    );
    assert!(hit.is_none());
}

#[test]
fn test_hit_follows_resize() {
    let (driver, _) = run_frames(40);
    let mut small = PixelSurface::new(320, 240);
    let layout = driver.redraw(&mut small);
    let first = driver.state().history()[0];
    let p = layout.to_pixel(&first);

    let hit = HitTester::default()
        .find_nearest(p.x, p.y, driver.state(), driver.material(), small.dims())
        .unwrap();
    assert_eq!(hit, first);
}
