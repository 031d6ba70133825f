//! Pointer tracking: client-space pointer positions to normalized device
//! coordinates of the render surface.

use glam::Vec2;

/// Raw pointer position in CSS pixels, origin top-left, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen rectangle of the render surface, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Map a pointer position into NDC (x right, y up, [-1, 1] inside the rect).
///
/// Positions outside the rect map outside [-1, 1]; that is still a valid ray.
/// Returns `None` only for a rect with no area.
pub fn to_ndc(pointer: PointerPosition, rect: SurfaceRect) -> Option<Vec2> {
    if rect.is_degenerate() {
        return None;
    }
    let x = ((pointer.x - rect.left) / rect.width) * 2.0 - 1.0;
    let y = -((pointer.y - rect.top) / rect.height) * 2.0 + 1.0;
    Some(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_pointer_is_passed_through() {
        let rect = SurfaceRect::new(0.0, 0.0, 100.0, 100.0);
        let ndc = to_ndc(PointerPosition::new(150.0, -50.0), rect).unwrap();
        assert_eq!(ndc, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn zero_area_rect_yields_nothing() {
        let pointer = PointerPosition::new(10.0, 10.0);
        assert!(to_ndc(pointer, SurfaceRect::new(0.0, 0.0, 0.0, 200.0)).is_none());
        assert!(to_ndc(pointer, SurfaceRect::new(0.0, 0.0, 300.0, f32::NAN)).is_none());
    }
}
