pub mod farmer;
pub mod geo;
pub mod market;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use farmer::*;
pub use geo::*;
pub use market::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;
