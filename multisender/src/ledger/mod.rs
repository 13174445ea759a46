// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Access to the asset-custody system the engine distributes from.
//!
//! The engine never holds balances itself. Every lookup and every debit or credit goes
//! through a [`LedgerGateway`], and every batch runs inside exactly one
//! [`Ledger::atomically`] unit of work so that a failing leg discards the effects of the
//! legs before it.

pub mod memory;

use crate::common::{Address, Amount, TokenId, U256};
use std::sync::Arc;

pub use memory::InMemoryLedger;

/// Specialisation of `std::Result` for ledger operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not enough balance, {available} available, {required} required")]
    InsufficientBalance { available: Amount, required: Amount },
    #[error("Insufficient allowance, {allowance} approved, {required} required")]
    InsufficientAllowance { allowance: Amount, required: Amount },
    #[error("Caller is not token owner nor approved")]
    NotApproved,
    #[error("Transfer from incorrect owner")]
    NotOwner,
    #[error("Invalid token ID {0}")]
    NonexistentToken(TokenId),
    #[error("Token ID {0} is already minted")]
    AlreadyMinted(TokenId),
    #[error("Recipient {0} rejected the payment")]
    RecipientRejected(Address),
    #[error("Transfer to the zero address")]
    ZeroAddress,
    #[error("No token contract at {0}")]
    UnknownToken(Address),
    #[error("Overflow occurred while crediting {0}")]
    Overflow(Address),
    #[error("{ids} ids but {amounts} amounts")]
    LengthMismatch { ids: usize, amounts: usize },
    #[error("{0} cannot set approval status for itself")]
    SelfApproval(Address),
}

/// Balance queries and transfer primitives over the four asset kinds.
///
/// The `*_from` transfers move assets owned by `from` on behalf of `spender`/`operator`. The
/// gateway enforces the owner's prior authorization (allowance or operator approval); callers
/// do not check it themselves.
pub trait LedgerGateway {
    fn native_balance_of(&self, owner: Address) -> Amount;

    /// Move native value. Fails rather than losing funds when `to` cannot accept it.
    fn transfer_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()>;

    fn token_balance_of(&self, token: Address, owner: Address) -> Amount;

    fn token_allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;

    fn token_transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;

    /// Number of non-fungible tokens held by `owner`.
    fn nft_balance_of(&self, token: Address, owner: Address) -> U256;

    fn owner_of(&self, token: Address, id: TokenId) -> Result<Address>;

    fn nft_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
    ) -> Result<()>;

    fn multi_token_balance_of(&self, token: Address, owner: Address, id: TokenId) -> Amount;

    fn multi_token_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: TokenId,
        amount: Amount,
    ) -> Result<()>;

    /// Whether `operator` holds blanket transfer authorization over `owner`'s assets of `token`.
    fn is_approved_for_all(&self, token: Address, owner: Address, operator: Address) -> bool;
}

/// A transactional ledger.
pub trait Ledger {
    /// Run `work` as one unit of work.
    ///
    /// Every effect `work` has on the gateway is committed together when it returns `Ok`, and
    /// none of them is when it returns `Err`. Units of work are serialized with each other.
    fn atomically<T, E, F>(&self, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerGateway) -> std::result::Result<T, E>;
}

impl<L: Ledger> Ledger for Arc<L> {
    fn atomically<T, E, F>(&self, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerGateway) -> std::result::Result<T, E>,
    {
        (**self).atomically(work)
    }
}
