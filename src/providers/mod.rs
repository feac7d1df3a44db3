pub mod geocode;
pub mod phone;
