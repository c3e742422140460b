pub mod help;
pub mod quit;
pub mod reload;
pub mod retry;
pub mod show;
pub mod state;
pub mod stats;
pub mod usage;
