pub mod features;
pub mod scoring;
pub mod text;
pub mod vector;
pub mod weather;
