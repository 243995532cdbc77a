pub mod cycler;
pub mod grid;
