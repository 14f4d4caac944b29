pub mod config;
pub mod data;
pub mod fallback;
pub mod gemini;
pub mod menu;
pub mod page;
pub mod provider;
