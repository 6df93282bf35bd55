use std::fmt;

/// Reasons an account operation is rejected
///
/// A rejected operation never changes the balance or the transaction log.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AccountError {
    #[error("Deposit amount must be positive.")]
    NonPositiveDeposit,
    #[error("Withdrawal amount must be positive.")]
    NonPositiveWithdrawal,
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Interest rate must be positive.")]
    NonPositiveRate,
    #[error("Invalid recipient account.")]
    InvalidRecipient,
    #[error("Transfer failed.")]
    TransferFailed,
    #[error("Account cannot be closed. Withdraw remaining balance: {0}")]
    RemainingBalance(f64),
}

/// The outcome of a successful account operation
///
/// Displays as the confirmation message handed back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Receipt {
    Deposited { amount: f64, balance: f64 },
    Withdrew { amount: f64, balance: f64 },
    InterestApplied { interest: f64, balance: f64 },
    Transferred { amount: f64, recipient: String, balance: f64 },
    Closed { holder: String },
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receipt::Deposited { amount, balance } => {
                write!(f, "Deposited {amount}. Current balance: {balance}")
            }
            Receipt::Withdrew { amount, balance } => {
                write!(f, "Withdrew {amount}. Current balance: {balance}")
            }
            Receipt::InterestApplied { interest, balance } => {
                write!(f, "Interest of {interest} applied. New balance: {balance}")
            }
            Receipt::Transferred { amount, recipient, balance } => {
                write!(f, "Transferred {amount} to {recipient}. Current balance: {balance}")
            }
            Receipt::Closed { holder } => write!(f, "Account for {holder} is closed."),
        }
    }
}

/// One record of the transaction log
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Deposited { amount: f64, balance: f64 },
    Withdrew { amount: f64, balance: f64 },
    InterestApplied { rate: f64, balance: f64 },
    Sent { amount: f64, recipient: String, balance: f64 },
    Received { amount: f64, sender: String, balance: f64 },
    Closed,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Deposited { amount, balance } => {
                write!(f, "Deposited {amount}. Balance: {balance}")
            }
            Entry::Withdrew { amount, balance } => {
                write!(f, "Withdrew {amount}. Balance: {balance}")
            }
            Entry::InterestApplied { rate, balance } => {
                write!(f, "Interest applied at {rate}%. Balance: {balance}")
            }
            Entry::Sent { amount, recipient, balance } => {
                write!(f, "Transferred {amount} to {recipient}. Balance: {balance}")
            }
            Entry::Received { amount, sender, balance } => {
                write!(f, "Received {amount} from {sender}. Balance: {balance}")
            }
            Entry::Closed => f.write_str("Account closed."),
        }
    }
}

/// A single holder's account
///
/// The account consists of:
/// 1. The balance:
///    Never negative. Every operation validates its input
///    before touching the balance, so a rejected call is a no-op.
/// 2. The transaction log:
///    An append-only record of every state-changing operation,
///    rendered by [`Account::transaction_summary`].
#[derive(Clone, Debug)]
pub struct Account {
    holder: String,
    balance: f64,
    log: Vec<Entry>,
    closed: bool,
}

impl Account {
    /// Creates a new account for the holder with an empty log
    ///
    /// The initial balance is not validated here, see
    /// [`Ledger::create_account`](crate::Ledger::create_account).
    pub fn new(holder: impl Into<String>, balance: f64) -> Self {
        Self {
            holder: holder.into(),
            balance,
            log: Vec::new(),
            closed: false,
        }
    }

    /// The name of the account holder
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// The current balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Whether [`Account::close`] succeeded at least once
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// All log entries, oldest first
    pub fn log(&self) -> &[Entry] {
        &self.log
    }

    /// Deposits the specified amount on the account
    pub fn deposit(&mut self, amount: f64) -> Result<Receipt, AccountError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AccountError::NonPositiveDeposit);
        }

        self.balance += amount;
        self.log.push(Entry::Deposited { amount, balance: self.balance });
        tracing::debug!(holder = %self.holder, amount, balance = self.balance, "deposit");

        Ok(Receipt::Deposited { amount, balance: self.balance })
    }

    /// Withdraws the specified amount from the account
    pub fn withdraw(&mut self, amount: f64) -> Result<Receipt, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        if !(amount.is_finite() && amount > 0.0) {
            return Err(AccountError::NonPositiveWithdrawal);
        }

        self.balance -= amount;
        self.log.push(Entry::Withdrew { amount, balance: self.balance });
        tracing::debug!(holder = %self.holder, amount, balance = self.balance, "withdrawal");

        Ok(Receipt::Withdrew { amount, balance: self.balance })
    }

    /// Adds interest at `rate` percent of the current balance
    pub fn apply_interest(&mut self, rate: f64) -> Result<Receipt, AccountError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(AccountError::NonPositiveRate);
        }

        let interest = self.balance * (rate / 100.0);
        self.balance += interest;
        self.log.push(Entry::InterestApplied { rate, balance: self.balance });
        tracing::debug!(holder = %self.holder, rate, interest, balance = self.balance, "interest");

        Ok(Receipt::InterestApplied { interest, balance: self.balance })
    }

    /// Moves the specified amount from this account to `recipient`
    ///
    /// Both accounts are borrowed exclusively for the duration of the call,
    /// so either both balances change or neither does. Sending to the same
    /// account is impossible here, the ledger reports it as an invalid recipient.
    pub fn transfer(
        &mut self,
        amount: f64,
        recipient: &mut Account,
    ) -> Result<Receipt, AccountError> {
        if !(amount.is_finite() && amount > 0.0) || self.balance < amount {
            return Err(AccountError::TransferFailed);
        }

        self.balance -= amount;
        recipient.balance += amount;
        self.log.push(Entry::Sent {
            amount,
            recipient: recipient.holder.clone(),
            balance: self.balance,
        });
        recipient.log.push(Entry::Received {
            amount,
            sender: self.holder.clone(),
            balance: recipient.balance,
        });
        tracing::debug!(
            sender = %self.holder,
            recipient = %recipient.holder,
            amount,
            "transfer"
        );

        Ok(Receipt::Transferred {
            amount,
            recipient: recipient.holder.clone(),
            balance: self.balance,
        })
    }

    /// The current balance as a message
    pub fn check_balance(&self) -> String {
        format!("Current balance: {}", self.balance)
    }

    /// All log entries joined by newlines
    pub fn transaction_summary(&self) -> String {
        if self.log.is_empty() {
            return "No transactions yet.".to_owned();
        }

        self.log
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Closes the account
    ///
    /// ### Important
    /// Only an account without remaining funds can be closed. Closing only
    /// records the event, the account stays usable afterwards.
    pub fn close(&mut self) -> Result<Receipt, AccountError> {
        if self.balance > 0.0 {
            return Err(AccountError::RemainingBalance(self.balance));
        }

        self.closed = true;
        self.log.push(Entry::Closed);
        tracing::debug!(holder = %self.holder, "closed");

        Ok(Receipt::Closed { holder: self.holder.clone() })
    }
}

impl serde::Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        use serde::ser::SerializeStruct;
        let mut map = serializer.serialize_struct("Account", 3)?;

        map.serialize_field("holder", &self.holder)?;
        map.serialize_field("balance", &self.balance)?;
        map.serialize_field("closed", &self.closed)?;

        map.end()
    }
}
