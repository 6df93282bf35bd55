/// The different operations a [`Command`] can request
#[derive(Clone, Copy, Debug, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Opens a new account, the amount is the initial balance
    Open,
    /// A credit to the holder's account
    Deposit,
    /// A debit to the holder's account
    Withdraw,
    /// Interest at the given percentage
    Interest,
    /// Moves funds from the holder to the recipient
    Transfer,
    /// Closes an account without remaining funds
    Close,
    /// Removes an account without remaining funds from the ledger
    Delete,
    /// Reports the current balance
    Balance,
    /// Reports the transaction log
    Summary,
}

/// A command
///
/// Commands are orders to the ledger to open, modify or remove the
/// account of a holder. They are usually read from CSV rows of the form
/// `op, holder, recipient, amount`.
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
pub struct Command {
    op: Operation,
    holder: String,
    recipient: Option<String>,
    amount: Option<f64>,
}

impl Command {
    /// Creates a command without recipient or amount
    pub fn new(op: Operation, holder: impl Into<String>) -> Self {
        Self {
            op,
            holder: holder.into(),
            recipient: None,
            amount: None,
        }
    }

    /// Sets the amount, or the rate for interest
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the receiving holder of a transfer
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// The requested operation
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The holder the command is for
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// The receiving holder
    /// Will only be populated for transfers
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    /// The amount, or the rate for interest
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }
}
