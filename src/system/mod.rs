pub mod collector;
pub mod platform;
pub mod report;
pub mod sampler;
pub mod source;
