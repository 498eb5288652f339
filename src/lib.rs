//! Image-to-video prompt generator
//!
//! Fetches an image from S3, asks a vision model to describe it, then asks a
//! text model to turn that description and the caller's request into a
//! cinematic video-generation prompt.

pub mod ai;
pub mod codec;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
