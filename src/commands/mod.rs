// Converge a group to a desired state
pub mod apply;

// Module mode (JSON in, JSON out)
pub mod run;
