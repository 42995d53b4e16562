pub mod backup;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod ids;
pub mod model;
pub mod policy;
pub mod policy_iteration;
pub mod value_iteration;

#[cfg(test)]
mod tests;
