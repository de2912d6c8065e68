pub mod config;
pub mod consts;
pub mod controller;
pub mod cursor;
pub mod deferred;
pub mod error;
pub mod geometry;
pub mod image_io;
pub mod viewport;
