#![cfg(test)]

mod axis_tests;
