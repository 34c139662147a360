pub mod cli;
pub mod config;
pub mod kernel;

// Re-export the kernel API for evaluators
pub use kernel::{
    catch_block, catch_tag, catch_throw, EvalResult, ExecutionContext, Fatal, Flow, Ident,
    Identity, Resume, Signal,
};
