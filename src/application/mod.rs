pub mod dto;
pub mod image_input;
pub mod ports;
pub mod services;
