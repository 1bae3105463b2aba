//! Progress reporting for agent runs

pub mod reporter;
