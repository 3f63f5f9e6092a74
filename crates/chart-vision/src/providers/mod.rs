//! Concrete vision provider implementations

pub mod gemini;

pub use gemini::GeminiProvider;
