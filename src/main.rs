#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Geochem;
#[allow(non_snake_case)]
pub mod Melts;

use Examples::melts_examples::melts_examples;

pub fn main() {
    //
    let task: usize = 1;
    melts_examples(task);
}
