pub mod asset_namer;
pub mod entities;
pub mod policies;
pub mod thumbnail_planner;
