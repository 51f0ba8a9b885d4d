pub mod cli;
pub mod codec;
pub mod config;
pub mod convert;
pub mod cross;
pub mod environment;
pub mod error;
pub mod face;
pub mod image2d;
pub mod projection;
pub mod upload;

pub use convert::CubeFaceSet;
pub use environment::{EnvironmentImage, SampleSource};
pub use error::{EnvironmentError, Representation};
pub use face::CubeFace;
pub use image2d::Image2D;
