pub mod openweather;

pub use openweather::{CurrentConditions, OpenWeatherSource};
