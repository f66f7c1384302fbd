pub mod callouts;
pub mod logic;
