// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount, TokenId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of asset a batch distributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    NativeCurrency,
    FungibleToken,
    NonFungibleToken,
    MultiToken,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::NativeCurrency => "native currency",
            AssetKind::FungibleToken => "fungible token",
            AssetKind::NonFungibleToken => "non-fungible token",
            AssetKind::MultiToken => "multi-token",
        };
        write!(f, "{name}")
    }
}

/// One batch distribution, as built by the caller right before submitting it.
///
/// The sequences are aligned by position. Their lengths are checked by the engine, not
/// here, so a malformed request can still be built, encoded and rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchRequest {
    Native {
        recipients: Vec<Address>,
        values: Vec<Amount>,
        /// Total value attached to the call.
        escrowed: Amount,
    },
    Fungible {
        token: Address,
        recipients: Vec<Address>,
        amounts: Vec<Amount>,
    },
    NonFungible {
        token: Address,
        recipients: Vec<Address>,
        ids: Vec<TokenId>,
    },
    MultiToken {
        token: Address,
        recipients: Vec<Address>,
        ids: Vec<TokenId>,
        amounts: Vec<Amount>,
    },
}

impl BatchRequest {
    pub fn kind(&self) -> AssetKind {
        match self {
            BatchRequest::Native { .. } => AssetKind::NativeCurrency,
            BatchRequest::Fungible { .. } => AssetKind::FungibleToken,
            BatchRequest::NonFungible { .. } => AssetKind::NonFungibleToken,
            BatchRequest::MultiToken { .. } => AssetKind::MultiToken,
        }
    }

    /// The token contract, absent for native currency.
    pub fn asset_address(&self) -> Option<Address> {
        match self {
            BatchRequest::Native { .. } => None,
            BatchRequest::Fungible { token, .. }
            | BatchRequest::NonFungible { token, .. }
            | BatchRequest::MultiToken { token, .. } => Some(*token),
        }
    }

    pub fn recipients(&self) -> &[Address] {
        match self {
            BatchRequest::Native { recipients, .. }
            | BatchRequest::Fungible { recipients, .. }
            | BatchRequest::NonFungible { recipients, .. }
            | BatchRequest::MultiToken { recipients, .. } => recipients,
        }
    }

    /// Value attached to the call; zero for every token kind.
    pub fn attached_value(&self) -> Amount {
        match self {
            BatchRequest::Native { escrowed, .. } => *escrowed,
            _ => Amount::ZERO,
        }
    }
}

/// A single `(recipient, amount_or_id)` transfer within a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    pub recipient: Address,
    /// An amount for native and fungible batches, a token id for non-fungible ones.
    pub value: Amount,
}

/// A single multi-token transfer: `amount` units of `id` to `recipient`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiTokenLeg {
    pub recipient: Address,
    pub id: TokenId,
    pub amount: Amount,
}
