pub mod info;
pub mod render;
pub mod synth;
pub mod track;
