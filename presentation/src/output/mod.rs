//! Output formatting for company reports

pub mod console;
