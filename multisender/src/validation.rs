// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Input checks run once per batch, before any transfer leg executes.

use crate::common::{Address, Amount, TokenId};
use crate::error::{Error, Result};
use crate::request::{Leg, MultiTokenLeg};

pub const RECIPIENTS_AND_VALUES: &str = "recipients and values";
pub const RECIPIENTS_AND_IDS: &str = "recipients and ids";

/// Check that two positionally aligned sequences have the same length.
pub fn validate<A, B>(recipients: &[A], counterpart: &[B], pair: &'static str) -> Result<()> {
    if recipients.len() != counterpart.len() {
        warn!(
            "Rejecting batch: {} recipients but {} counterpart entries ({pair})",
            recipients.len(),
            counterpart.len()
        );
        return Err(Error::LengthMismatch(pair));
    }
    Ok(())
}

fn check_size(legs: usize, max_legs: Option<usize>) -> Result<()> {
    if legs == 0 {
        warn!("Rejecting batch without recipients");
        return Err(Error::EmptyBatch);
    }
    match max_legs {
        Some(max) if legs > max => {
            warn!("Rejecting batch of {legs} transfers, the limit is {max}");
            Err(Error::BatchTooLarge { legs, max })
        }
        _ => Ok(()),
    }
}

/// Validate and pair up recipients with their amounts (or ids).
pub fn legs(
    recipients: &[Address],
    values: &[Amount],
    pair: &'static str,
    max_legs: Option<usize>,
) -> Result<Vec<Leg>> {
    validate(recipients, values, pair)?;
    check_size(recipients.len(), max_legs)?;
    Ok(recipients
        .iter()
        .zip(values)
        .map(|(recipient, value)| Leg {
            recipient: *recipient,
            value: *value,
        })
        .collect())
}

/// Validate and pair up recipients with their token ids and amounts.
pub fn multi_token_legs(
    recipients: &[Address],
    ids: &[TokenId],
    amounts: &[Amount],
    max_legs: Option<usize>,
) -> Result<Vec<MultiTokenLeg>> {
    validate(recipients, ids, RECIPIENTS_AND_IDS)?;
    validate(recipients, amounts, RECIPIENTS_AND_VALUES)?;
    check_size(recipients.len(), max_legs)?;
    Ok(recipients
        .iter()
        .zip(ids.iter().zip(amounts))
        .map(|(recipient, (id, amount))| MultiTokenLeg {
            recipient: *recipient,
            id: *id,
            amount: *amount,
        })
        .collect())
}
