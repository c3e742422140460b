pub mod goto;
pub mod size;
pub mod step;
