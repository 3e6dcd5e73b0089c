//! Edges of the system: the CSV script and report formats, and the live
//! stdin feed.

pub mod csv;
pub mod stdin;
