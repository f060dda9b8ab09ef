pub mod melts_examples;
