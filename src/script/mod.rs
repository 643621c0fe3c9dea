//! Scene-script vocabulary, material symbols and readers.

pub(crate) mod command;
pub(crate) mod reader;
pub(crate) mod symbols;
