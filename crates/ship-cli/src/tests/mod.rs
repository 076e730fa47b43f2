mod app;
mod cli;
mod error;
mod logger;
