pub mod debug;
pub mod episodes;
pub mod titles;
