//! Heuristic tables and decision logic for disclosure narratives.

pub mod amounts;
pub mod boilerplate;
pub mod keyword;
pub mod section;
