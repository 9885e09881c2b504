pub mod button;
pub mod dot_ring;
