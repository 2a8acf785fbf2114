pub mod bubble;
pub mod header;
pub mod welcome;
