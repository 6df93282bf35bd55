use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::{Command, Ledger, LedgerError};

/// A ledger that can be shared between threads
///
/// A single lock guards the whole account collection. Transfers hold it
/// for the full debit and credit, so no observer ever sees one side of a
/// transfer without the other.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Wraps an existing ledger
    pub fn new(ledger: Ledger) -> Self {
        Self { inner: Arc::new(Mutex::new(ledger)) }
    }

    /// Exclusive access to the underlying ledger
    pub fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock()
    }

    /// Transfers between two holders while holding the lock
    pub fn transfer(
        &self,
        sender: &str,
        recipient: &str,
        amount: f64,
    ) -> Result<String, LedgerError> {
        self.lock().transfer_between_accounts(sender, recipient, amount)
    }

    /// Processes one command while holding the lock
    pub fn execute(&self, command: &Command) -> Result<String, LedgerError> {
        self.lock().execute(command)
    }

    /// The sum of all balances
    pub fn total_balance(&self) -> f64 {
        self.lock().total_balance()
    }

    /// Holder and balance of every account, taken under one lock
    pub fn snapshot(&self) -> Vec<(String, f64)> {
        self.lock()
            .accounts()
            .iter()
            .map(|account| (account.holder().to_owned(), account.balance()))
            .collect()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
