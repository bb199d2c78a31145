pub mod math;
pub mod renderer;
