pub mod gemini;
pub mod memory_repo;
pub mod slack;
