pub mod currency;
pub mod quote;
pub mod weather;

pub use currency::{conversion_chain, ConversionRequest};
pub use quote::quote_chain;
pub use weather::{validate_city, weather_chain};
