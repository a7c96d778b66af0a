//! Assembly of report data for the two batch entry points.

pub mod daily;
pub mod weekly;
