#![doc = "aurora-readme-core: core README assembly engine for aurora-readme."]

//! This crate contains everything that can be exercised without a network
//! or a terminal: the repository locator, the document assembly engine and
//! its merge rules, badge construction, the collaborator trait contracts,
//! and session snapshot persistence.
//!
//! # Usage
//! Add this as a dependency for the assembly, contract and session code;
//! concrete model clients live in the CLI crate and implement the traits
//! declared in [`contract`].

pub mod assemble;
pub mod badge;
pub mod contract;
pub mod locator;
pub mod session;
