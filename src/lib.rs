//! DIY Build Planner
//!
//! Turns a description of a space and a project into a build plan: a
//! shopping list with prices, a tool list, ordered steps, a time estimate
//! and safety notes. Also carries a quick build catalog and a local journal
//! of saved plans and builds.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod import;
pub mod logging;
pub mod models;
pub mod quick_builds;
pub mod render;
pub mod suggest;
pub mod tools;
pub mod units;

pub use error::PlannerError;
pub use generator::{PlanStamp, SystemStamp, generate_plan, generate_plan_with};
pub use suggest::suggest_projects;
pub use tools::{filter_tools_by_availability, get_tool_alternatives, is_tool_essential};
