//! Command line front end for the `fshelf` binary

pub mod args;
pub mod output;
