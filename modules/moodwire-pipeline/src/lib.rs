pub mod artifact;
pub mod loader;
pub mod normalize;
pub mod sentiment;
pub mod source;
pub mod stages;
