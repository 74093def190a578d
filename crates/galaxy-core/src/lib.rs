pub mod animation;
pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod labels;
pub mod nebula;
pub mod params;
pub mod spiral;
pub mod state;
pub mod texture;
pub mod words;

pub use animation::*;
pub use camera::*;
pub use color::*;
pub use error::*;
pub use frame_loop::*;
pub use geometry::*;
pub use labels::*;
pub use nebula::*;
pub use params::*;
pub use spiral::*;
pub use state::*;
pub use texture::*;
pub use words::*;
