#![cfg(test)]

mod polygon_tests;
mod loader_tests;
