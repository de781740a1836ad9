// Domain layer - pollutant scales and AQI math
pub mod aqi;
pub mod breakpoints;
pub mod pollutant;
pub mod reading;
