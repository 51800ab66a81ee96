#![cfg(test)]

mod encoding_tests;
