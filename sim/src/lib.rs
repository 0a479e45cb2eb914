pub mod coeffs;
pub mod config;
pub mod fixed;
pub mod framework;
pub mod pipeline;
pub mod reference;
pub mod samples;
mod utils;
pub mod verify;

pub use coeffs::CoeffTable;
pub use config::FilterConfig;
pub use pipeline::FirPipeline;
pub use reference::ReferenceFir;
