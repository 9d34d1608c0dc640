pub mod answer_validator;
pub mod banner;
pub mod cli;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod generator;
pub mod gui;
pub mod operations;
pub mod random_source;
pub mod report;
pub mod session;
