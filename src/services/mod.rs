pub mod ledger;
pub mod referee;
pub mod server;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
