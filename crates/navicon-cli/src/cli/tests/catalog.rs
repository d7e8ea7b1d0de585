//! Tests for add, list, remove.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_add() {
    match parse(&["navicon", "add", "Rust", "https://www.rust-lang.org"]) {
        CliCommand::Add { title, url } => {
            assert_eq!(title, "Rust");
            assert_eq!(url, "https://www.rust-lang.org");
        }
        _ => panic!("expected Add"),
    }
}

#[test]
fn cli_parse_add_requires_url() {
    assert!(Cli::try_parse_from(["navicon", "add", "Rust"]).is_err());
}

#[test]
fn cli_parse_list() {
    match parse(&["navicon", "list"]) {
        CliCommand::List => {}
        _ => panic!("expected List"),
    }
}

#[test]
fn cli_parse_remove() {
    match parse(&["navicon", "remove", "12"]) {
        CliCommand::Remove { id } => assert_eq!(id, 12),
        _ => panic!("expected Remove"),
    }
}

#[test]
fn cli_parse_remove_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(["navicon", "remove", "abc"]).is_err());
}
