pub mod adjustment;
