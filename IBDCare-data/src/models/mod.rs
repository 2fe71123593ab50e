// Data layer model structures

pub mod journal;
pub mod medication;
