pub mod subprocess;
