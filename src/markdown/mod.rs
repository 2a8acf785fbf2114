pub mod highlight;
pub mod render;
