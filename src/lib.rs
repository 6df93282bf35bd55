pub use self::{
    account::{Account, AccountError, Entry, Receipt},
    command::{Command, Operation},
    ledger::{Ledger, LedgerError, Richest},
    shared::SharedLedger,
};

mod account;
mod command;
mod ledger;
mod shared;
