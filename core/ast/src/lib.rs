#![warn(clippy::pedantic)]
//! Abstract syntax tree for SDL schemas.
//!
//! The crate owns everything that happens before semantic analysis: the node
//! types and their attribute model, construction functions that turn literal
//! tokens into validated nodes, the lexer and parser for the schema syntax,
//! constant expression evaluation for attribute values, the [`visitor::Visitor`]
//! capability every pass is written against, and a debug printer.
pub mod attributes;
pub mod builder;
pub mod errors;
pub mod expr;
pub mod lexer;
pub mod nodes;
pub(crate) mod nodes_impl;
pub mod parser;
pub mod printer;
pub mod visitor;
