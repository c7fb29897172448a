pub mod cache;
pub mod coherence;
pub mod config;
pub mod coverage;
pub mod generator;
pub mod grammar;
pub mod pipeline;
pub mod prompt;
pub mod readability;
pub mod speech;
pub mod syllable;
pub mod text;
pub mod validator;
