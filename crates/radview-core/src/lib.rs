pub mod error;
pub mod consts;
pub mod geometry;
pub mod frame;
pub mod io;
pub mod render;
pub mod pipeline;
pub mod viewport;
pub mod mapper;
pub mod gesture;
pub mod measure;
pub mod overlay;
pub mod cine;
pub mod session;
