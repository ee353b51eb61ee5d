//! 2D camera with a rotating, pseudo-isometric projection
//!
//! The camera maps game-space coordinates to screen-space through a rotated,
//! vertically-skewed basis, per-axis zoom, and a movable projection center.
//! The inverse mapping is exact: for any valid camera state,
//! `game_coords(screen_coords(p)) == p` up to float tolerance.
//!
//! Rectangles are a deliberate exception: `screen_rect` transforms the anchor
//! corner and scales width/height by zoom without rotating the corners, so
//! screen-space hit rects stay axis-aligned at any rotation. `game_rect`
//! inverts exactly that mapping.

use macroquad::prelude::*;

/// Lower clamp for flatness. The inverse transform divides by the basis
/// determinant (which scales with flatness), so flatness must never be 0.
pub const FLATNESS_MIN: f32 = 0.05;

/// Handle to an entity owned elsewhere (the camera never stores positions
/// of followed entities, only this id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Zoom argument: a uniform scalar or independent x/y factors.
///
/// Replaces the runtime shape check of a dynamically-typed `zoom(factor)`:
/// anything that is neither a scalar nor a 2-component value does not
/// convert, so the invalid-argument case is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomFactor {
    Uniform(f32),
    PerAxis(Vec2),
}

impl ZoomFactor {
    fn as_vec2(self) -> Vec2 {
        match self {
            ZoomFactor::Uniform(f) => vec2(f, f),
            ZoomFactor::PerAxis(v) => v,
        }
    }
}

impl From<f32> for ZoomFactor {
    fn from(f: f32) -> Self {
        ZoomFactor::Uniform(f)
    }
}

impl From<(f32, f32)> for ZoomFactor {
    fn from((x, y): (f32, f32)) -> Self {
        ZoomFactor::PerAxis(vec2(x, y))
    }
}

impl From<[f32; 2]> for ZoomFactor {
    fn from(v: [f32; 2]) -> Self {
        ZoomFactor::PerAxis(vec2(v[0], v[1]))
    }
}

impl From<Vec2> for ZoomFactor {
    fn from(v: Vec2) -> Self {
        ZoomFactor::PerAxis(v)
    }
}

/// Follow state: pull `position` toward the target whenever their projected
/// screen-space distance exceeds `max_dist` (screen units).
#[derive(Debug, Clone, Copy)]
struct FollowTarget {
    target: EntityId,
    max_dist: f32,
}

/// Anchors captured at drag start: the pointer position and the projection
/// center at that moment.
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    pointer: Vec2,
    projection: Vec2,
}

/// One camera per rendering surface. Created once at startup, mutated by
/// input bindings and `update`, queried by everything that draws.
#[derive(Debug, Clone)]
pub struct Camera2D {
    screen_size: Vec2,
    /// Where `position` lands on screen. Normally the screen center;
    /// shifted by drag gestures.
    projection_center: Vec2,
    /// World-space focus point.
    position: Vec2,
    /// Degrees, normalized to [0, 360).
    rotation: f32,
    /// [FLATNESS_MIN, 1.0]. 1 = no skew, small values flatten the y axis.
    flatness: f32,
    /// Rotated, skewed basis. Always equal to
    /// `transform_basis(rotation, flatness)`.
    basis_x: Vec2,
    basis_y: Vec2,
    /// Per-axis scale factors. Unbounded; a zero component degenerates the
    /// projection and is the caller's responsibility to avoid.
    zoom_level: Vec2,
    follow: Option<FollowTarget>,
    drag: Option<DragAnchor>,
}

/// The camera basis for a given rotation (degrees) and flatness: the x basis
/// is the rotation direction with its y component skewed, the y basis is the
/// skewed perpendicular.
fn transform_basis(rotation: f32, flatness: f32) -> (Vec2, Vec2) {
    let theta = rotation.to_radians();
    let basis_x = vec2(theta.cos(), flatness * theta.sin());
    let basis_y = vec2(theta.sin(), -flatness * theta.cos());
    (basis_x, basis_y)
}

impl Camera2D {
    /// Camera for a surface of the given size, centered on the game origin
    /// with identity zoom, no rotation and no skew.
    pub fn new(screen_size: Vec2) -> Self {
        let (basis_x, basis_y) = transform_basis(0.0, 1.0);
        Self {
            screen_size,
            projection_center: screen_size * 0.5,
            position: Vec2::ZERO,
            rotation: 0.0,
            flatness: 1.0,
            basis_x,
            basis_y,
            zoom_level: vec2(1.0, 1.0),
            follow: None,
            drag: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn flatness(&self) -> f32 {
        self.flatness
    }

    pub fn zoom_level(&self) -> Vec2 {
        self.zoom_level
    }

    pub fn projection_center(&self) -> Vec2 {
        self.projection_center
    }

    pub fn screen_size(&self) -> Vec2 {
        self.screen_size
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Set the rotation in degrees. Any finite value is accepted and
    /// normalized to [0, 360).
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
        let (bx, by) = transform_basis(self.rotation, self.flatness);
        self.basis_x = bx;
        self.basis_y = by;
    }

    /// Rotate by a delta in degrees.
    pub fn rotate(&mut self, delta: f32) {
        self.set_rotation(self.rotation + delta);
    }

    /// Set the flatness, clamped to [FLATNESS_MIN, 1.0].
    pub fn set_isometry(&mut self, flatness: f32) {
        self.flatness = flatness.clamp(FLATNESS_MIN, 1.0);
        let (bx, by) = transform_basis(self.rotation, self.flatness);
        self.basis_x = bx;
        self.basis_y = by;
    }

    /// Tilt by a flatness delta.
    pub fn tilt(&mut self, delta: f32) {
        self.set_isometry(self.flatness + delta);
    }

    /// Multiply the zoom level componentwise. Accepts a scalar or an (x, y)
    /// pair. A factor of 0 is not rejected but degenerates the projection.
    pub fn zoom(&mut self, factor: impl Into<ZoomFactor>) {
        self.zoom_level *= factor.into().as_vec2();
    }

    /// Move the focus point by a game-space delta.
    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Set the focus point absolutely, in game coordinates.
    pub fn set_game_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Begin a drag gesture: capture the pointer and the current projection
    /// center as anchors. Call once per gesture.
    pub fn drag_start(&mut self, pointer: Vec2) {
        self.drag = Some(DragAnchor {
            pointer,
            projection: self.projection_center,
        });
    }

    /// Continue a drag gesture: shift the projection center by the pointer
    /// delta since `drag_start`. No-op if no gesture is active.
    pub fn drag_update(&mut self, pointer: Vec2) {
        if let Some(anchor) = self.drag {
            self.projection_center = anchor.projection + (pointer - anchor.pointer);
        }
    }

    /// End the current drag gesture.
    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Follow an entity: `update` pulls the focus point toward it whenever
    /// the projected gap exceeds `max_dist` screen units.
    pub fn follow(&mut self, target: EntityId, max_dist: f32) {
        self.follow = Some(FollowTarget { target, max_dist });
    }

    /// Stop following.
    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    /// Per-tick follow step. `resolve` maps the followed entity id to its
    /// current game-space position; the camera holds no reference to the
    /// entity itself. No-op when not following or when the id no longer
    /// resolves.
    pub fn update(&mut self, resolve: impl FnOnce(EntityId) -> Option<Vec2>) {
        let Some(follow) = self.follow else {
            return;
        };
        let Some(target) = resolve(follow.target) else {
            return;
        };
        let screen_gap =
            (self.screen_coords(target) - self.screen_coords(self.position)).length();
        let gap = screen_gap - follow.max_dist;
        if gap <= 0.0 {
            return;
        }
        // The gap is measured on screen but the step is taken in game space,
        // clamped so the camera never overshoots the target.
        let delta = target - self.position;
        let dist = delta.length();
        if dist > f32::EPSILON {
            self.position += delta * (gap.min(dist) / dist);
        }
    }

    /// Reset zoom to identity and the focus point to the origin; when
    /// following, snap to the target's position instead.
    pub fn reset(&mut self, resolve: impl FnOnce(EntityId) -> Option<Vec2>) {
        self.zoom_level = vec2(1.0, 1.0);
        self.position = Vec2::ZERO;
        if let Some(follow) = self.follow {
            if let Some(target) = resolve(follow.target) {
                self.position = target;
            }
        }
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Project a game-space point to screen space.
    pub fn screen_coords(&self, game: Vec2) -> Vec2 {
        let p = game - self.position;
        let projected = vec2(
            p.x * self.basis_x.x + p.y * self.basis_y.x,
            p.x * self.basis_x.y + p.y * self.basis_y.y,
        );
        projected * self.zoom_level + self.projection_center
    }

    /// Project a list of game-space points, order-preserving.
    pub fn screen_coords_many(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.screen_coords(p)).collect()
    }

    /// Project an axis-aligned game-space rect: anchor corner through the
    /// full transform, width/height scaled by zoom only. The result stays
    /// axis-aligned regardless of rotation.
    pub fn screen_rect(&self, rect: Rect) -> Rect {
        let anchor = self.screen_coords(rect.point());
        Rect::new(
            anchor.x,
            anchor.y,
            rect.w * self.zoom_level.x,
            rect.h * self.zoom_level.y,
        )
    }

    /// Unproject a screen-space point to game space. Exact inverse of
    /// `screen_coords` for any valid state: the basis determinant is
    /// `-flatness`, which the clamp keeps away from zero.
    pub fn game_coords(&self, screen: Vec2) -> Vec2 {
        let p = (screen - self.projection_center) / self.zoom_level;
        let det = self.basis_x.x * self.basis_y.y - self.basis_x.y * self.basis_y.x;
        let game = vec2(
            (p.x * self.basis_y.y - p.y * self.basis_y.x) / det,
            (p.y * self.basis_x.x - p.x * self.basis_x.y) / det,
        );
        game + self.position
    }

    /// Unproject a list of screen-space points, order-preserving.
    pub fn game_coords_many(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.game_coords(p)).collect()
    }

    /// Inverse of `screen_rect`.
    pub fn game_rect(&self, rect: Rect) -> Rect {
        let anchor = self.game_coords(rect.point());
        Rect::new(
            anchor.x,
            anchor.y,
            rect.w / self.zoom_level.x,
            rect.h / self.zoom_level.y,
        )
    }

    /// The visible area in game coordinates, as an axis-aligned
    /// approximation from screen size and zoom (rotation ignored, like the
    /// rect transforms).
    pub fn view_rect(&self) -> Rect {
        let half = self.screen_size * 0.5 / self.zoom_level;
        Rect::new(
            self.position.x - half.x,
            self.position.y - half.y,
            half.x * 2.0,
            half.y * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_vec2_eq(a: Vec2, b: Vec2) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    fn camera() -> Camera2D {
        Camera2D::new(vec2(800.0, 600.0))
    }

    /// Identity state except for the projection center, which tests zero out
    /// so screen coords equal game coords directly.
    fn identity_camera() -> Camera2D {
        let mut cam = camera();
        cam.projection_center = Vec2::ZERO;
        cam
    }

    #[test]
    fn test_identity_projection() {
        let cam = identity_camera();
        for p in [
            vec2(0.0, 0.0),
            vec2(10.0, 5.0),
            vec2(-3.5, 7.25),
            vec2(1000.0, -1000.0),
        ] {
            assert_vec2_eq(cam.screen_coords(p), p);
        }
    }

    #[test]
    fn test_round_trip() {
        let states: Vec<Camera2D> = {
            let mut v = Vec::new();

            let mut cam = camera();
            cam.set_rotation(45.0);
            cam.set_isometry(0.5);
            cam.zoom(30.0);
            cam.set_game_position(vec2(12.0, -7.0));
            v.push(cam);

            let mut cam = camera();
            cam.set_rotation(303.7);
            cam.set_isometry(0.05);
            cam.zoom((2.0, 0.25));
            cam.move_by(vec2(-100.0, 42.0));
            v.push(cam);

            let mut cam = camera();
            cam.set_rotation(180.0);
            cam.drag_start(vec2(10.0, 10.0));
            cam.drag_update(vec2(60.0, -20.0));
            v.push(cam);

            v
        };

        let points = [
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(0.0, 1.0),
            vec2(-17.5, 33.25),
            vec2(400.0, -280.0),
        ];
        for cam in &states {
            for &p in &points {
                assert_vec2_eq(cam.game_coords(cam.screen_coords(p)), p);
                let s = cam.screen_coords(p);
                assert_vec2_eq(cam.screen_coords(cam.game_coords(s)), s);
            }
        }
    }

    #[test]
    fn test_rect_round_trip() {
        let mut cam = camera();
        cam.set_rotation(120.0);
        cam.set_isometry(0.3);
        cam.zoom((4.0, 2.0));
        cam.set_game_position(vec2(5.0, 5.0));

        let rect = Rect::new(-2.0, 3.0, 7.5, 1.25);
        let back = cam.game_rect(cam.screen_rect(rect));
        assert!((back.x - rect.x).abs() < EPS);
        assert!((back.y - rect.y).abs() < EPS);
        assert!((back.w - rect.w).abs() < EPS);
        assert!((back.h - rect.h).abs() < EPS);
    }

    #[test]
    fn test_rect_stays_axis_aligned() {
        // Rect width/height only scale by zoom, even under rotation.
        let mut cam = camera();
        cam.set_rotation(45.0);
        cam.zoom(2.0);
        let out = cam.screen_rect(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert!((out.w - 20.0).abs() < EPS);
        assert!((out.h - 8.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_normalization() {
        let mut cam = camera();
        cam.set_rotation(370.0);
        assert!((cam.rotation() - 10.0).abs() < EPS);
        cam.set_rotation(-10.0);
        assert!((cam.rotation() - 350.0).abs() < EPS);
        cam.set_rotation(720.0);
        assert!(cam.rotation().abs() < EPS);
    }

    #[test]
    fn test_flatness_clamp() {
        let mut cam = camera();
        cam.set_isometry(-5.0);
        assert!((cam.flatness() - FLATNESS_MIN).abs() < EPS);
        cam.set_isometry(5.0);
        assert!((cam.flatness() - 1.0).abs() < EPS);
        cam.set_isometry(0.0);
        assert!((cam.flatness() - FLATNESS_MIN).abs() < EPS);
    }

    #[test]
    fn test_tilt_accumulates_through_clamp() {
        let mut cam = camera();
        cam.set_isometry(0.1);
        cam.tilt(-0.2);
        assert!((cam.flatness() - FLATNESS_MIN).abs() < EPS);
        cam.tilt(0.5);
        assert!((cam.flatness() - (FLATNESS_MIN + 0.5)).abs() < EPS);
    }

    #[test]
    fn test_zoom_scaling() {
        let mut cam = camera();
        cam.zoom(2.0);
        assert_vec2_eq(cam.zoom_level(), vec2(2.0, 2.0));
        cam.zoom((0.5, 1.0));
        assert_vec2_eq(cam.zoom_level(), vec2(1.0, 2.0));
        cam.zoom([2.0, 0.5]);
        assert_vec2_eq(cam.zoom_level(), vec2(2.0, 1.0));
    }

    #[test]
    fn test_pan_shifts_scene_opposite() {
        let mut cam = identity_camera();
        cam.move_by(vec2(10.0, 5.0));
        assert_vec2_eq(cam.screen_coords(vec2(0.0, 0.0)), vec2(-10.0, -5.0));
    }

    #[test]
    fn test_list_matches_elementwise() {
        let mut cam = camera();
        cam.set_rotation(30.0);
        cam.set_isometry(0.4);
        cam.zoom(3.0);
        let pts = [vec2(1.0, 2.0), vec2(-4.0, 0.5), vec2(9.0, 9.0)];
        let many = cam.screen_coords_many(&pts);
        assert_eq!(many.len(), pts.len());
        for (i, &p) in pts.iter().enumerate() {
            assert_vec2_eq(many[i], cam.screen_coords(p));
        }
        let back = cam.game_coords_many(&many);
        for (i, &p) in pts.iter().enumerate() {
            assert_vec2_eq(back[i], p);
        }
    }

    #[test]
    fn test_basis_tracks_setters() {
        let mut cam = camera();
        cam.set_rotation(77.0);
        cam.set_isometry(0.31);
        cam.rotate(-12.5);
        cam.tilt(0.1);
        let (bx, by) = transform_basis(cam.rotation(), cam.flatness());
        assert_vec2_eq(cam.basis_x, bx);
        assert_vec2_eq(cam.basis_y, by);
    }

    #[test]
    fn test_drag_shifts_projection_center() {
        let mut cam = camera();
        let center = cam.projection_center();
        cam.drag_start(vec2(100.0, 100.0));
        cam.drag_update(vec2(130.0, 80.0));
        assert_vec2_eq(cam.projection_center(), center + vec2(30.0, -20.0));

        // A second gesture anchors at the shifted center.
        cam.drag_end();
        cam.drag_start(vec2(0.0, 0.0));
        cam.drag_update(vec2(5.0, 5.0));
        assert_vec2_eq(
            cam.projection_center(),
            center + vec2(30.0, -20.0) + vec2(5.0, 5.0),
        );
    }

    #[test]
    fn test_drag_update_without_start_is_noop() {
        let mut cam = camera();
        let center = cam.projection_center();
        cam.drag_update(vec2(500.0, 500.0));
        assert_vec2_eq(cam.projection_center(), center);
    }

    #[test]
    fn test_follow_within_threshold_stays_put() {
        let mut cam = camera();
        cam.follow(EntityId(1), 50.0);
        cam.update(|_| Some(vec2(10.0, 0.0)));
        assert_vec2_eq(cam.position(), Vec2::ZERO);
    }

    #[test]
    fn test_follow_closes_screen_space_gap() {
        let mut cam = camera();
        cam.follow(EntityId(1), 50.0);
        // Identity zoom: screen distance equals game distance (200), so the
        // camera steps 150 toward the target.
        cam.update(|_| Some(vec2(200.0, 0.0)));
        assert_vec2_eq(cam.position(), vec2(150.0, 0.0));
        // Now inside the threshold; no further movement.
        cam.update(|_| Some(vec2(200.0, 0.0)));
        assert_vec2_eq(cam.position(), vec2(150.0, 0.0));
    }

    #[test]
    fn test_follow_step_clamps_at_target() {
        let mut cam = camera();
        cam.zoom(10.0);
        cam.follow(EntityId(1), 0.0);
        // Screen gap (10x the game gap) exceeds the game distance; the step
        // must stop at the target rather than overshoot.
        cam.update(|_| Some(vec2(30.0, 0.0)));
        assert_vec2_eq(cam.position(), vec2(30.0, 0.0));
    }

    #[test]
    fn test_update_without_target_is_noop() {
        let mut cam = camera();
        cam.move_by(vec2(3.0, 4.0));
        cam.update(|_| Some(vec2(999.0, 999.0)));
        assert_vec2_eq(cam.position(), vec2(3.0, 4.0));

        cam.follow(EntityId(7), 1.0);
        cam.update(|_| None);
        assert_vec2_eq(cam.position(), vec2(3.0, 4.0));
    }

    #[test]
    fn test_reset() {
        let mut cam = camera();
        cam.zoom((3.0, 0.5));
        cam.move_by(vec2(40.0, -9.0));
        cam.rotate(90.0);
        cam.reset(|_| None);
        assert_vec2_eq(cam.zoom_level(), vec2(1.0, 1.0));
        assert_vec2_eq(cam.position(), Vec2::ZERO);
        // Rotation is untouched by reset.
        assert!((cam.rotation() - 90.0).abs() < EPS);
    }

    #[test]
    fn test_reset_snaps_to_follow_target() {
        let mut cam = camera();
        cam.follow(EntityId(2), 10.0);
        cam.zoom(4.0);
        cam.reset(|id| (id == EntityId(2)).then_some(vec2(77.0, 88.0)));
        assert_vec2_eq(cam.position(), vec2(77.0, 88.0));
        assert_vec2_eq(cam.zoom_level(), vec2(1.0, 1.0));
    }

    #[test]
    fn test_view_rect_tracks_zoom() {
        let mut cam = camera();
        cam.zoom(2.0);
        let view = cam.view_rect();
        assert!((view.w - 400.0).abs() < EPS);
        assert!((view.h - 300.0).abs() < EPS);
        assert!((view.x - -200.0).abs() < EPS);
    }

    #[test]
    fn test_determinant_is_negative_flatness() {
        for (rot, flat) in [(0.0, 1.0), (45.0, 0.5), (200.0, 0.05), (359.0, 0.8)] {
            let (bx, by) = transform_basis(rot, flat);
            let det = bx.x * by.y - bx.y * by.x;
            assert!((det + flat).abs() < EPS);
        }
    }
}
