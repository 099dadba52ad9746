//! CLI command implementations.

pub(crate) mod parse;

pub(crate) use parse::ParseArgs;
