mod cors;
pub mod startup;
