pub mod formatter;
pub mod history;
pub mod stocks;

#[cfg(test)]
mod stocks_tests;
