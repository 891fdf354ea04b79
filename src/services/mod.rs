pub mod disease;
pub mod irrigation;
pub mod location;
pub mod market;
pub mod recommend;
pub mod soil;
pub mod weather;

pub use disease::DiseaseService;
pub use irrigation::IrrigationService;
pub use location::LocationService;
pub use market::MarketService;
pub use recommend::RecommendationService;
pub use soil::SoilService;
pub use weather::WeatherService;
