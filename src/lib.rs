// src/lib.rs

//! stationpref Library
//!
//! Client for the Practice School Division portal: logs in through the
//! ASP.NET login form, reads the station list and problem bank, and submits a
//! ranked list of station preferences.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;
