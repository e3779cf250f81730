#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Command line tool that recovers legacy transaction senders and IBFT block sealers from data a
//! node already returned.

pub mod cli;
pub mod commands;
pub mod utils;
