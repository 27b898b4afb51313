//! Integration tests for relpack

mod helpers;
mod test_checkout;
mod test_cli;
