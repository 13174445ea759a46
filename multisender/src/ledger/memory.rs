// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use super::{Error, Ledger, LedgerGateway, Result};
use crate::common::{Address, Amount, TokenId, U256};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

/// An in-process ledger used for our test cases. A real ledger is the chain itself, with the
/// token contracts holding their own books.
///
/// All books sit behind one lock. A unit of work takes the write lock, runs against a
/// working copy of the books and swaps the copy in only when the work succeeds, so a failed
/// batch leaves the committed books exactly as they were.
///
/// The working copy is a clone of every book, so a unit of work costs time proportional to
/// the whole ledger rather than to the batch. That is fine at test-fixture sizes.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    books: RwLock<Books>,
}

#[derive(Debug, Clone, Default)]
struct Books {
    native: BTreeMap<Address, Amount>,
    /// Accounts that refuse incoming native payments, like a contract without a payable
    /// fallback.
    rejects_native: BTreeSet<Address>,
    fungible: BTreeMap<Address, FungibleBook>,
    non_fungible: BTreeMap<Address, NonFungibleBook>,
    multi_token: BTreeMap<Address, MultiTokenBook>,
    /// token --> (owner, operator) pairs, shared by the non-fungible and multi-token books
    operators: BTreeMap<Address, BTreeSet<(Address, Address)>>,
}

#[derive(Debug, Clone, Default)]
struct FungibleBook {
    balances: BTreeMap<Address, Amount>,
    /// (owner, spender) --> remaining allowance
    allowances: BTreeMap<(Address, Address), Amount>,
}

#[derive(Debug, Clone, Default)]
struct NonFungibleBook {
    owners: BTreeMap<TokenId, Address>,
    balances: BTreeMap<Address, U256>,
    token_approvals: BTreeMap<TokenId, Address>,
}

#[derive(Debug, Clone, Default)]
struct MultiTokenBook {
    /// (id, owner) --> balance
    balances: BTreeMap<(TokenId, Address), Amount>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Books) -> T) -> T {
        // Books are only ever replaced wholesale after a unit of work succeeds, so a
        // poisoned lock still guards a consistent state.
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        f(&books)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Books) -> T) -> T {
        let mut books = self.books.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut books)
    }

    // ---- setup, the equivalent of minting on mock token contracts ----

    /// Set the native balance of an account.
    pub fn set_native_balance(&self, owner: Address, amount: Amount) {
        self.write(|books| {
            books.native.insert(owner, amount);
        });
    }

    /// Make `account` refuse every incoming native payment.
    pub fn reject_native_payments(&self, account: Address) {
        self.write(|books| {
            books.rejects_native.insert(account);
        });
    }

    /// Mint fungible tokens, creating the token's book on first use.
    pub fn mint_fungible(&self, token: Address, to: Address, amount: Amount) -> Result<()> {
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }
        self.write(|books| {
            let balance = books
                .fungible
                .entry(token)
                .or_default()
                .balances
                .entry(to)
                .or_default();
            *balance = balance.checked_add(amount).ok_or(Error::Overflow(to))?;
            Ok(())
        })
    }

    /// Approve `spender` to move up to `amount` of `owner`'s fungible tokens.
    /// `U256::MAX` is an allowance that is never used up.
    pub fn approve(&self, token: Address, owner: Address, spender: Address, amount: Amount) {
        debug!("Approving {spender:?} to spend {amount} of {owner:?}'s tokens at {token:?}");
        self.write(|books| {
            books
                .fungible
                .entry(token)
                .or_default()
                .allowances
                .insert((owner, spender), amount);
        });
    }

    /// Mint a non-fungible token, creating the token's book on first use.
    pub fn mint_non_fungible(&self, token: Address, to: Address, id: TokenId) -> Result<()> {
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }
        self.write(|books| {
            let book = books.non_fungible.entry(token).or_default();
            if book.owners.contains_key(&id) {
                return Err(Error::AlreadyMinted(id));
            }
            book.owners.insert(id, to);
            let count = book.balances.entry(to).or_default();
            *count = count.saturating_add(U256::from(1));
            Ok(())
        })
    }

    /// Approve `spender` to move a single non-fungible token.
    pub fn approve_token(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        id: TokenId,
    ) -> Result<()> {
        self.write(|books| {
            let book = books
                .non_fungible
                .get_mut(&token)
                .ok_or(Error::UnknownToken(token))?;
            match book.owners.get(&id) {
                None => Err(Error::NonexistentToken(id)),
                Some(current) if *current != owner => Err(Error::NotApproved),
                Some(_) => {
                    book.token_approvals.insert(id, spender);
                    Ok(())
                }
            }
        })
    }

    /// Mint multi-token units for several ids at once, creating the token's book on first use.
    pub fn mint_multi_token_batch(
        &self,
        token: Address,
        to: Address,
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Result<()> {
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }
        if ids.len() != amounts.len() {
            return Err(Error::LengthMismatch {
                ids: ids.len(),
                amounts: amounts.len(),
            });
        }
        self.write(|books| {
            let book = books.multi_token.entry(token).or_default();
            for (id, amount) in ids.iter().zip(amounts) {
                let balance = book.balances.entry((*id, to)).or_default();
                *balance = balance.checked_add(*amount).ok_or(Error::Overflow(to))?;
            }
            Ok(())
        })
    }

    /// Grant or revoke blanket transfer authorization over a non-fungible or multi-token
    /// contract. Nothing needs to be minted at `token` first.
    pub fn set_approval_for_all(
        &self,
        token: Address,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<()> {
        debug!(
            "Setting approval for all of {owner:?}'s assets at {token:?} to {operator:?}: {approved}"
        );
        if owner == operator {
            return Err(Error::SelfApproval(owner));
        }
        self.write(|books| {
            let operators = books.operators.entry(token).or_default();
            if approved {
                operators.insert((owner, operator));
            } else {
                operators.remove(&(owner, operator));
            }
        });
        Ok(())
    }

    // ---- read access outside of a unit of work ----

    pub fn native_balance_of(&self, owner: Address) -> Amount {
        self.read(|books| books.native_balance_of(owner))
    }

    pub fn token_balance_of(&self, token: Address, owner: Address) -> Amount {
        self.read(|books| books.token_balance_of(token, owner))
    }

    pub fn token_allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.read(|books| books.token_allowance(token, owner, spender))
    }

    pub fn nft_balance_of(&self, token: Address, owner: Address) -> U256 {
        self.read(|books| books.nft_balance_of(token, owner))
    }

    pub fn owner_of(&self, token: Address, id: TokenId) -> Result<Address> {
        self.read(|books| books.owner_of(token, id))
    }

    pub fn multi_token_balance_of(&self, token: Address, owner: Address, id: TokenId) -> Amount {
        self.read(|books| books.multi_token_balance_of(token, owner, id))
    }

    pub fn is_approved_for_all(&self, token: Address, owner: Address, operator: Address) -> bool {
        self.read(|books| books.is_approved_for_all(token, owner, operator))
    }
}

impl Ledger for InMemoryLedger {
    fn atomically<T, E, F>(&self, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerGateway) -> std::result::Result<T, E>,
    {
        self.write(|committed| {
            let mut working = committed.clone();
            let outcome = work(&mut working).inspect_err(|_| {
                trace!("Unit of work failed, discarding its effects");
            })?;
            *committed = working;
            Ok(outcome)
        })
    }
}

fn credit(balance: &mut Amount, amount: Amount, account: Address) -> Result<()> {
    *balance = balance.checked_add(amount).ok_or(Error::Overflow(account))?;
    Ok(())
}

fn debit(balance: &mut Amount, amount: Amount) -> Result<()> {
    *balance = balance
        .checked_sub(amount)
        .ok_or(Error::InsufficientBalance {
            available: *balance,
            required: amount,
        })?;
    Ok(())
}

impl LedgerGateway for Books {
    fn native_balance_of(&self, owner: Address) -> Amount {
        self.native.get(&owner).copied().unwrap_or_default()
    }

    fn transfer_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        if self.rejects_native.contains(&to) {
            return Err(Error::RecipientRejected(to));
        }
        debit(self.native.entry(from).or_default(), amount)?;
        credit(self.native.entry(to).or_default(), amount, to)
    }

    fn token_balance_of(&self, token: Address, owner: Address) -> Amount {
        self.fungible
            .get(&token)
            .and_then(|book| book.balances.get(&owner))
            .copied()
            .unwrap_or_default()
    }

    fn token_allowance(&self, token: Address, owner: Address, spender: Address) -> Amount {
        self.fungible
            .get(&token)
            .and_then(|book| book.allowances.get(&(owner, spender)))
            .copied()
            .unwrap_or_default()
    }

    fn token_transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let book = self
            .fungible
            .get_mut(&token)
            .ok_or(Error::UnknownToken(token))?;

        let allowance = book.allowances.entry((from, spender)).or_default();
        if *allowance < amount {
            return Err(Error::InsufficientAllowance {
                allowance: *allowance,
                required: amount,
            });
        }
        if *allowance != U256::MAX {
            *allowance -= amount;
        }

        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }
        debit(book.balances.entry(from).or_default(), amount)?;
        credit(book.balances.entry(to).or_default(), amount, to)
    }

    fn nft_balance_of(&self, token: Address, owner: Address) -> U256 {
        self.non_fungible
            .get(&token)
            .and_then(|book| book.balances.get(&owner))
            .copied()
            .unwrap_or_default()
    }

    fn owner_of(&self, token: Address, id: TokenId) -> Result<Address> {
        let book = self
            .non_fungible
            .get(&token)
            .ok_or(Error::UnknownToken(token))?;
        book.owners
            .get(&id)
            .copied()
            .ok_or(Error::NonexistentToken(id))
    }

    fn nft_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
    ) -> Result<()> {
        let owner = self.owner_of(token, id)?;
        let token_approval = self
            .non_fungible
            .get(&token)
            .and_then(|book| book.token_approvals.get(&id));
        let authorized = operator == owner
            || self.is_approved_for_all(token, owner, operator)
            || token_approval == Some(&operator);
        if !authorized {
            return Err(Error::NotApproved);
        }
        if owner != from {
            return Err(Error::NotOwner);
        }
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }

        let book = self
            .non_fungible
            .get_mut(&token)
            .ok_or(Error::UnknownToken(token))?;
        book.token_approvals.remove(&id);
        let from_count = book.balances.entry(from).or_default();
        *from_count = from_count.saturating_sub(U256::from(1));
        let to_count = book.balances.entry(to).or_default();
        *to_count = to_count.saturating_add(U256::from(1));
        book.owners.insert(id, to);
        Ok(())
    }

    fn multi_token_balance_of(&self, token: Address, owner: Address, id: TokenId) -> Amount {
        self.multi_token
            .get(&token)
            .and_then(|book| book.balances.get(&(id, owner)))
            .copied()
            .unwrap_or_default()
    }

    fn multi_token_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<()> {
        if !self.multi_token.contains_key(&token) {
            return Err(Error::UnknownToken(token));
        }
        if operator != from && !self.is_approved_for_all(token, from, operator) {
            return Err(Error::NotApproved);
        }
        let book = self
            .multi_token
            .get_mut(&token)
            .ok_or(Error::UnknownToken(token))?;
        if to.is_zero() {
            return Err(Error::ZeroAddress);
        }
        debit(book.balances.entry((id, from)).or_default(), amount)?;
        credit(book.balances.entry((id, to)).or_default(), amount, to)
    }

    fn is_approved_for_all(&self, token: Address, owner: Address, operator: Address) -> bool {
        self.operators
            .get(&token)
            .is_some_and(|operators| operators.contains(&(owner, operator)))
    }
}
