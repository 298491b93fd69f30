pub mod askama_renderer;

pub use askama_renderer::AskamaViewRenderer;
