pub mod service;
pub mod tools;
