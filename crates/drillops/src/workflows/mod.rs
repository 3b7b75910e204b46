pub mod dispatch;
pub mod ledger;
