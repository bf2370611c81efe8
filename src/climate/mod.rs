pub mod vpd;
