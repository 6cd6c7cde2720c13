pub mod catalog;
pub mod checksum;
pub mod cloudinary;
pub mod config;
pub mod delivery;
pub mod gemini;
pub mod http;
pub mod logger;
pub mod prompts;
pub mod report;
pub mod transform;
pub mod upload;
