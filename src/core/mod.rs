pub mod ancestry_gen;
pub mod logging;
