mod config;
mod pipeline;
mod scan;
