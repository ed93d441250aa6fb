//! Viewing camera
//!
//! # Coordinate System
//!
//! Camera space is **left-handed**:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (away from the viewer)
//!
//! # Kinds
//!
//! - **Euler**: orientation given as rotation angles (degrees) about X, Y, Z.
//! - **UVN**: orientation derived from a look-at target and the world up axis.
//!
//! Both kinds end in the same place: a single world-to-camera matrix.

use std::str::FromStr;

use crate::error::RenderError;
use crate::math::{Mat4, Vec4};
use crate::object::GameObject;

/// How the camera orientation is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraKind {
    /// Euler angles in degrees, applied X then Y then Z.
    Euler { direction: Vec4 },
    /// Looks from the camera position toward `target`.
    Uvn { target: Vec4 },
}

/// The name of a camera kind, as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKindName {
    Euler,
    Uvn,
}

impl FromStr for CameraKindName {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(CameraKindName::Euler),
            "uvn" => Ok(CameraKindName::Uvn),
            _ => Err(RenderError::UnknownCameraKind(s.to_string())),
        }
    }
}

impl CameraKind {
    /// Builds a camera kind from its configuration name, picking the
    /// matching orientation parameter.
    pub fn from_name(name: &str, direction: Vec4, target: Vec4) -> Result<Self, RenderError> {
        Ok(match name.parse::<CameraKindName>()? {
            CameraKindName::Euler => CameraKind::Euler {
                direction: direction.as_direction(),
            },
            CameraKindName::Uvn => CameraKind::Uvn {
                target: target.as_point(),
            },
        })
    }
}

/// A perspective camera.
///
/// The view plane is 2 units wide and `2 / aspect` units tall, which puts the
/// projected X range at [-1, 1] for every field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec4,
    kind: CameraKind,
    fov: f32, // Horizontal field of view in degrees
    near: f32,
    far: f32,
    viewport_width: u32,
    viewport_height: u32,
    aspect: f32,
    view_plane_width: f32,
    view_plane_height: f32,
    view_dist: f32,
}

impl Camera {
    /// A camera with the given clip planes and viewport; the projection
    /// parameters are derived immediately.
    pub fn new(
        position: Vec4,
        kind: CameraKind,
        fov: f32,
        near: f32,
        far: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Self {
        let mut camera = Self {
            position: position.as_point(),
            kind,
            fov,
            near,
            far,
            viewport_width,
            viewport_height,
            aspect: 1.0,
            view_plane_width: 2.0,
            view_plane_height: 2.0,
            view_dist: 1.0,
        };
        camera.update_projection();
        camera
    }

    /// A camera oriented by Euler angles in degrees.
    pub fn euler(position: Vec4, direction: Vec4, fov: f32, viewport: (u32, u32)) -> Self {
        Self::new(
            position,
            CameraKind::Euler {
                direction: direction.as_direction(),
            },
            fov,
            0.3,
            1000.0,
            viewport.0,
            viewport.1,
        )
    }

    /// A camera at `position` looking at `target`.
    pub fn uvn(position: Vec4, target: Vec4, fov: f32, viewport: (u32, u32)) -> Self {
        Self::new(
            position,
            CameraKind::Uvn {
                target: target.as_point(),
            },
            fov,
            0.3,
            1000.0,
            viewport.0,
            viewport.1,
        )
    }

    fn update_projection(&mut self) {
        self.aspect = self.viewport_width as f32 / self.viewport_height.max(1) as f32;
        self.view_plane_width = 2.0;
        self.view_plane_height = 2.0 / self.aspect;
        self.view_dist = 0.5 * self.view_plane_width / (self.fov.to_radians() * 0.5).tan();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// World-space camera position.
    pub fn position(&self) -> Vec4 {
        self.position
    }

    /// Orientation model and its parameter.
    pub fn kind(&self) -> CameraKind {
        self.kind
    }

    /// Horizontal field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Near clip distance along +Z.
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip distance along +Z.
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Screen width in pixels.
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Screen height in pixels.
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Viewport width over height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Always 2: the view plane spans `[-1, 1]` horizontally.
    pub fn view_plane_width(&self) -> f32 {
        self.view_plane_width
    }

    /// `2 / aspect`.
    pub fn view_plane_height(&self) -> f32 {
        self.view_plane_height
    }

    /// Distance from the eye to the view plane, `1 / tan(fov / 2)`.
    pub fn view_dist(&self) -> f32 {
        self.view_dist
    }

    /// tan(fov / 2): the horizontal half-extent of the frustum at z = 1.
    pub fn tan_half_fov(&self) -> f32 {
        0.5 * self.view_plane_width / self.view_dist
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Moves the camera; the view matrix picks it up on its next call.
    pub fn set_position(&mut self, position: Vec4) -> &mut Self {
        self.position = position.as_point();
        self
    }

    /// Replaces the orientation model.
    pub fn set_kind(&mut self, kind: CameraKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Changes the field of view and recomputes the projection parameters.
    pub fn set_fov(&mut self, fov: f32) -> &mut Self {
        self.fov = fov;
        self.update_projection();
        self
    }

    /// Sets the near and far clip distances.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> &mut Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Resizes the viewport and recomputes the projection parameters.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> &mut Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_projection();
        self
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// Computes the world-to-camera matrix.
    ///
    /// Euler: translate by `-P`, then rotate by the negated angles in X, Y, Z
    /// order, that is `Rz(-z) * Ry(-y) * Rx(-x) * T(-P)`.
    /// UVN: the basis (u, v, n) as rows, combined with the translation to the
    /// camera position.
    pub fn view_matrix(&self) -> Mat4 {
        match self.kind {
            CameraKind::Euler { direction } => {
                Mat4::rotation_euler(-direction.x, -direction.y, -direction.z)
                    * Mat4::translation(-self.position.x, -self.position.y, -self.position.z)
            }
            CameraKind::Uvn { target } => Mat4::look_at_lh(self.position, target, Vec4::UP).0,
        }
    }

    /// The camera's (u, v, n) basis in world space: right, up, forward.
    pub fn basis(&self) -> [Vec4; 3] {
        let view = self.view_matrix();
        [0, 1, 2].map(|row| Vec4::direction(view.get(row, 0), view.get(row, 1), view.get(row, 2)))
    }

    // =========================================================================
    // Culling
    // =========================================================================

    /// Tests the object's bounding sphere against the near/far planes and the
    /// left/right and top/bottom plane pairs.
    ///
    /// Returns `true` and marks the object culled when the sphere lies
    /// entirely outside one of them. Spheres straddling the corner of two
    /// planes are kept.
    pub fn cull_object(&self, object: &mut GameObject) -> bool {
        let center = self.view_matrix() * object.transform().position();
        let radius = object.max_radius();

        let outside_z = center.z - radius > self.far || center.z + radius < self.near;

        let x_limit = 0.5 * self.view_plane_width * center.z / self.view_dist;
        let outside_x = center.x - radius > x_limit || center.x + radius < -x_limit;

        let y_limit = 0.5 * self.view_plane_height * center.z / self.view_dist;
        let outside_y = center.y - radius > y_limit || center.y + radius < -y_limit;

        let culled = outside_z || outside_x || outside_y;
        if culled {
            object.state.culled = true;
            log::trace!(
                "Culled object {:?} at camera z {:.2} (radius {:.2})",
                object.name(),
                center.z,
                radius
            );
        }
        culled
    }
}
