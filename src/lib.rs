// Library target for the integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the parts of the
// module tree that work without a terminal.
#![allow(dead_code)]

pub mod harness;
pub mod lab;
