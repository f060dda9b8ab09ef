#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Geochem;
#[allow(non_snake_case)]
pub mod Melts;
pub mod cli;
