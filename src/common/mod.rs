//! Process-wide plumbing shared by every entry point.

pub mod trace;
