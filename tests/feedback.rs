use glam::Vec3;
use ripple_text::config::{Sizing, ViewConfig};
use ripple_text::pointer::{PointerPosition, SurfaceRect};
use ripple_text::raycast::HitSurface;
use ripple_text::scene::{Layer, RippleScene};

const RECT: SurfaceRect = SurfaceRect {
    left: 0.0,
    top: 50.0,
    width: 800.0,
    height: 200.0,
};

fn scene() -> RippleScene {
    RippleScene::create(ViewConfig::default(), RECT.width).unwrap()
}

/// Client position of the pixel that sees `world`.
fn pointer_for(scene: &RippleScene, world: Vec3) -> PointerPosition {
    let ndc = scene.camera().view_projection().project_point3(world);
    PointerPosition::new(
        RECT.left + (ndc.x + 1.0) / 2.0 * RECT.width,
        RECT.top + (1.0 - ndc.y) / 2.0 * RECT.height,
    )
}

#[test]
fn hit_updates_both_programs_identically() {
    let mut scene = scene();
    let target = Vec3::new(2.0, -1.0, 0.0);

    let hit = scene
        .pointer_move(pointer_for(&scene, target), RECT)
        .expect("pointer over the plane should hit");
    assert!((hit - target).length() < 1e-3, "hit {hit:?}");

    let frame = scene.frame_uniforms();
    let text = frame.layer(Layer::Text);
    let shadow = frame.layer(Layer::Shadow);
    assert_eq!(text.displacement, hit);
    assert_eq!(shadow.displacement, hit);
    assert_eq!(text.projection, shadow.projection);
    assert_eq!(text.view, shadow.view);
    assert!(scene.displacement().is_resolved());
}

#[test]
fn miss_leaves_the_point_alone() {
    let mut scene = scene();
    let first = scene
        .pointer_move(pointer_for(&scene, Vec3::new(-3.0, 1.0, 0.0)), RECT)
        .unwrap();

    // far outside the surface: the ray passes beside the hit-plane
    let before = scene.displacement();
    assert!(scene
        .pointer_move(PointerPosition::new(4000.0, -3000.0), RECT)
        .is_none());
    assert_eq!(scene.displacement(), before);
    assert_eq!(scene.frame_uniforms().displacement, first);
}

#[test]
fn degenerate_rect_is_a_no_op() {
    let mut scene = scene();
    let before = scene.displacement();
    let empty = SurfaceRect::new(0.0, 0.0, 0.0, 0.0);
    assert!(scene
        .pointer_move(PointerPosition::new(10.0, 10.0), empty)
        .is_none());
    assert_eq!(scene.displacement(), before);
    assert!(!before.is_resolved());
}

#[test]
fn extra_surfaces_take_the_nearest_hit() {
    let mut scene = scene();
    scene.add_hit_surface(
        HitSurface::new("raised", 4.0, 4.0)
            .with_transform(glam::Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5))),
    );
    let hit = scene
        .pointer_move(pointer_for(&scene, Vec3::new(0.0, 0.0, 0.5)), RECT)
        .unwrap();
    assert!((hit.z - 0.5).abs() < 1e-3);
    assert_eq!(scene.hit_surfaces().len(), 2);
}

#[test]
fn responsive_resize_keeps_the_displacement() {
    let mut scene = scene();
    let hit = scene
        .pointer_move(pointer_for(&scene, Vec3::new(1.0, 1.0, 0.0)), RECT)
        .unwrap();
    let aspect_before = scene.camera().aspect;

    assert_eq!(scene.resize(400.0), Some((400.0, 200.0)));
    assert!((scene.camera().aspect - 2.0).abs() < 1e-6);
    assert_ne!(scene.camera().aspect, aspect_before);
    assert_eq!(scene.displacement().point(), hit);
}

#[test]
fn fixed_sizing_ignores_resize() {
    let config = ViewConfig {
        sizing: Sizing::Fixed {
            width: 600.0,
            height: 200.0,
        },
        ..ViewConfig::default()
    };
    let mut scene = RippleScene::create(config, 1234.0).unwrap();
    assert_eq!(scene.surface_size(), (600.0, 200.0));
    assert_eq!(scene.resize(300.0), None);
    assert!((scene.camera().aspect - 3.0).abs() < 1e-6);
}

#[test]
fn instances_are_independent() {
    let mut a = scene();
    let b = scene();
    a.pointer_move(pointer_for(&a, Vec3::new(3.0, 0.0, 0.0)), RECT)
        .unwrap();
    assert!(a.displacement().is_resolved());
    assert!(!b.displacement().is_resolved());
    assert_eq!(b.displacement().point(), Vec3::ZERO);
}
