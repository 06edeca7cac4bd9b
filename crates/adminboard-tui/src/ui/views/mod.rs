pub mod overview;
pub mod placeholder;
pub mod spark;
