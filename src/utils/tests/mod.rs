#![cfg(test)]

mod time_tests;
mod logger_tests;
