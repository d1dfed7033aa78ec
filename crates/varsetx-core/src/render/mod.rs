pub mod chain_render;

pub use chain_render::render_chain;
