pub mod elves;
pub mod errors;
pub mod toys;
