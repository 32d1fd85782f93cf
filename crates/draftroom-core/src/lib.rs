// Library root for the draft room core: pure draft computations, the feed
// boundary, configuration and persistence.

pub mod config;
pub mod db;
pub mod draft;
pub mod feed;
pub mod players;
