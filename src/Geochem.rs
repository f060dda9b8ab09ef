pub mod ind;
pub mod transform;
