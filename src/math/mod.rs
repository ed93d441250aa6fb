//! Vector and matrix primitives.

pub mod mat4;
pub mod vec2;
pub mod vec4;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec4::Vec4;
