pub mod cities;

pub use cities::load_cities;
