pub mod history;
pub mod ledger;
pub mod models;
