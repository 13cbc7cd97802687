pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod post;
pub mod storage;
pub mod controller {
    pub mod classifier;
    pub mod decision;
    pub mod espn;
    pub mod runner;
    pub mod schedule;
}
pub mod view {
    pub mod message;
}
