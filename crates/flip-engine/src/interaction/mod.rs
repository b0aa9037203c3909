pub mod choreography;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod mapper;
pub mod object;
