pub mod recommend;
pub mod plan;
pub mod courses;
pub mod docs;

pub use recommend::*;
pub use plan::*;
pub use courses::*;
pub use docs::*;
