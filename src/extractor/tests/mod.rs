#![cfg(test)]

mod sampler_tests;
