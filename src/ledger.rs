use std::fmt;

use crate::{Account, AccountError, Command, Operation};

/// Possible errors to occur during ledger operations
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("Initial balance cannot be negative.")]
    NegativeInitialBalance,
    #[error("An account for {0} already exists.")]
    DuplicateHolder(String),
    #[error("Account not found.")]
    AccountNotFound,
    #[error("Account cannot be deleted. Withdraw remaining balance first.")]
    RemainingBalance,
    #[error("Transfer failed. One or both accounts not found.")]
    TransferAccountsNotFound,
    #[error("No accounts found.")]
    NoAccounts,
    #[error("The command is missing an amount.")]
    AmountNotSpecified,
    #[error("The command is missing a recipient.")]
    RecipientNotSpecified,
}

/// The holder with the highest balance, see [`Ledger::account_with_highest_balance`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Richest<'a> {
    pub holder: &'a str,
    pub balance: f64,
}

impl fmt::Display for Richest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has the highest balance: {}", self.holder, self.balance)
    }
}

/// The registry of all accounts
///
/// Accounts are kept in the order they were created in, and each holder
/// owns at most one account.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
}

impl Ledger {
    /// Creates a new, empty ledger
    pub fn new() -> Self {
        Self { accounts: Vec::new() }
    }

    /// All current accounts in creation order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// The number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Opens a new account for the holder
    pub fn create_account(
        &mut self,
        holder: &str,
        initial_balance: f64,
    ) -> Result<String, LedgerError> {
        if initial_balance < 0.0 || initial_balance.is_nan() {
            return Err(LedgerError::NegativeInitialBalance);
        }
        if self.position(holder).is_some() {
            return Err(LedgerError::DuplicateHolder(holder.to_owned()));
        }

        self.accounts.push(Account::new(holder, initial_balance));
        tracing::debug!(holder, initial_balance, "account created");

        Ok(format!("Account created for {holder} with balance {initial_balance}."))
    }

    /// Looks up the account of a holder
    pub fn find_account(&self, holder: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.holder() == holder)
    }

    /// Looks up the account of a holder for modification
    pub fn find_account_mut(&mut self, holder: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.holder() == holder)
    }

    /// One `holder: balance` line per account
    pub fn list_accounts(&self) -> Result<Vec<String>, LedgerError> {
        if self.accounts.is_empty() {
            return Err(LedgerError::NoAccounts);
        }

        Ok(self.accounts
            .iter()
            .map(|account| format!("{}: {}", account.holder(), account.balance()))
            .collect())
    }

    /// Removes the account of a holder
    ///
    /// Only accounts without remaining funds can be removed.
    pub fn delete_account(&mut self, holder: &str) -> Result<String, LedgerError> {
        let index = self.position(holder).ok_or(LedgerError::AccountNotFound)?;
        if self.accounts[index].balance() > 0.0 {
            return Err(LedgerError::RemainingBalance);
        }

        self.accounts.remove(index);
        tracing::debug!(holder, "account deleted");

        Ok(format!("Account for {holder} has been deleted."))
    }

    /// Transfers funds between the accounts of two holders
    ///
    /// Both holders are resolved before any account is touched. A transfer
    /// from a holder to themselves is rejected as an invalid recipient.
    pub fn transfer_between_accounts(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: f64,
    ) -> Result<String, LedgerError> {
        let (sender, recipient) = match (self.position(sender), self.position(recipient)) {
            (Some(sender), Some(recipient)) => (sender, recipient),
            _ => return Err(LedgerError::TransferAccountsNotFound),
        };
        let (sender, recipient) = self
            .pair_mut(sender, recipient)
            .ok_or(AccountError::InvalidRecipient)?;

        let receipt = sender.transfer(amount, recipient)?;
        Ok(receipt.to_string())
    }

    /// The sum of all balances
    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(Account::balance).sum()
    }

    /// The account holding the most funds
    /// On ties the account created first wins.
    pub fn account_with_highest_balance(&self) -> Result<Richest<'_>, LedgerError> {
        let mut accounts = self.accounts.iter();
        let first = accounts.next().ok_or(LedgerError::NoAccounts)?;
        let richest = accounts.fold(first, |richest, account| {
            match account.balance() > richest.balance() {
                true => account,
                false => richest,
            }
        });

        Ok(Richest {
            holder: richest.holder(),
            balance: richest.balance(),
        })
    }

    /// Processes one command and returns the resulting message
    pub fn execute(&mut self, command: &Command) -> Result<String, LedgerError> {
        let holder = command.holder();
        let amount = || command.amount().ok_or(LedgerError::AmountNotSpecified);

        match command.op() {
            Operation::Open => self.create_account(holder, command.amount().unwrap_or(0.0)),
            Operation::Transfer => {
                let recipient = command.recipient().ok_or(LedgerError::RecipientNotSpecified)?;
                self.transfer_between_accounts(holder, recipient, amount()?)
            }
            Operation::Delete => self.delete_account(holder),
            Operation::Balance => Ok(self.account(holder)?.check_balance()),
            Operation::Summary => Ok(self.account(holder)?.transaction_summary()),
            Operation::Deposit => {
                let amount = amount()?;
                Ok(self.account_mut(holder)?.deposit(amount)?.to_string())
            }
            Operation::Withdraw => {
                let amount = amount()?;
                Ok(self.account_mut(holder)?.withdraw(amount)?.to_string())
            }
            Operation::Interest => {
                let rate = amount()?;
                Ok(self.account_mut(holder)?.apply_interest(rate)?.to_string())
            }
            Operation::Close => Ok(self.account_mut(holder)?.close()?.to_string()),
        }
    }

    fn position(&self, holder: &str) -> Option<usize> {
        self.accounts.iter().position(|account| account.holder() == holder)
    }

    fn account(&self, holder: &str) -> Result<&Account, LedgerError> {
        self.find_account(holder).ok_or(LedgerError::AccountNotFound)
    }

    fn account_mut(&mut self, holder: &str) -> Result<&mut Account, LedgerError> {
        self.find_account_mut(holder).ok_or(LedgerError::AccountNotFound)
    }

    /// Borrows two distinct accounts at once, `None` if both indices are equal
    fn pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Account, &mut Account)> {
        match first.cmp(&second) {
            std::cmp::Ordering::Less => {
                let (head, tail) = self.accounts.split_at_mut(second);
                Some((&mut head[first], &mut tail[0]))
            }
            std::cmp::Ordering::Greater => {
                let (head, tail) = self.accounts.split_at_mut(first);
                Some((&mut tail[0], &mut head[second]))
            }
            std::cmp::Ordering::Equal => None,
        }
    }
}
