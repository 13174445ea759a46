// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::ledger;
use thiserror::Error;

/// Specialisation of `std::Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
/// Batch distribution errors
pub enum Error {
    /// Two positionally aligned inputs disagree in length, e.g. "recipients and values".
    #[error("MultiSender: {0} not equal")]
    LengthMismatch(&'static str),
    #[error("MultiSender: no recipients given")]
    EmptyBatch,
    #[error("MultiSender: batch of {legs} transfers exceeds the limit of {max}")]
    BatchTooLarge { legs: usize, max: usize },
    /// A native currency transfer (leg, escrow or refund) could not complete.
    #[error("MultiSender: {0}")]
    TransferFailure(String),
    #[error("ERC20: insufficient allowance")]
    InsufficientAllowance,
    #[error("ERC721: transfer caller is not owner nor approved")]
    NotApproved,
    #[error("Overflow occurred while adding values")]
    NumericOverflow,
    #[error("Invalid calldata: {0}")]
    InvalidCalldata(String),
    #[error(transparent)]
    Ledger(ledger::Error),
}

impl From<ledger::Error> for Error {
    fn from(err: ledger::Error) -> Self {
        match err {
            ledger::Error::InsufficientAllowance { .. } => Error::InsufficientAllowance,
            ledger::Error::NotApproved => Error::NotApproved,
            other => Error::Ledger(other),
        }
    }
}
