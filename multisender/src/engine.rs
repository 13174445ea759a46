// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Amount, TokenId};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::request::{BatchRequest, Leg};
use crate::validation::{self, RECIPIENTS_AND_IDS, RECIPIENTS_AND_VALUES};

const FAILED_TO_SEND_ETHER: &str = "Failed to send Ether";

/// Distributes assets from one caller to many recipients, one batch per call.
///
/// Every batch is validated up front and then executed as a single unit of work on the
/// ledger: legs run in input order, and if any of them fails the whole batch is discarded.
#[derive(Debug)]
pub struct MultiSender<L> {
    ledger: L,
    config: Config,
}

impl<L: Ledger> MultiSender<L> {
    pub fn new(ledger: L, config: Config) -> Self {
        Self { ledger, config }
    }

    /// The engine's own ledger account.
    pub fn address(&self) -> Address {
        self.config.engine_address
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send native currency. `escrowed` is the value the caller attaches to the call; what
    /// is left of it after every recipient has been paid goes back to the caller.
    pub fn send_native(
        &self,
        caller: Address,
        recipients: &[Address],
        values: &[Amount],
        escrowed: Amount,
    ) -> Result<()> {
        let legs =
            validation::legs(recipients, values, RECIPIENTS_AND_VALUES, self.config.max_legs)?;
        let engine = self.address();
        info!(
            "Sending native currency from {caller:?} to {} recipients with {escrowed} escrowed",
            legs.len()
        );

        let refund = self.ledger.atomically(|gateway| -> Result<Amount> {
            gateway
                .transfer_native(caller, engine, escrowed)
                .map_err(|err| {
                    error!("Could not escrow {escrowed} from {caller:?}: {err}");
                    Error::TransferFailure(format!("Failed to escrow Ether: {err}"))
                })?;

            for (i, leg) in legs.iter().enumerate() {
                debug!("Leg {i}: sending {} to {:?}", leg.value, leg.recipient);
                gateway
                    .transfer_native(engine, leg.recipient, leg.value)
                    .map_err(|err| {
                        error!("Leg {i} to {:?} failed: {err}", leg.recipient);
                        Error::TransferFailure(FAILED_TO_SEND_ETHER.to_string())
                    })?;
            }

            let sent = total(&legs)?;
            // Cannot fail after the legs went through unless the engine paid out of funds
            // that were not part of this call's escrow.
            let refund = escrowed.checked_sub(sent).ok_or_else(|| {
                error!("Sent {sent} but only {escrowed} was escrowed");
                Error::TransferFailure(FAILED_TO_SEND_ETHER.to_string())
            })?;

            if !refund.is_zero() {
                debug!("Refunding {refund} to {caller:?}");
                gateway
                    .transfer_native(engine, caller, refund)
                    .map_err(|err| {
                        error!("Refund of {refund} to {caller:?} failed: {err}");
                        Error::TransferFailure(FAILED_TO_SEND_ETHER.to_string())
                    })?;
            }
            Ok(refund)
        })?;

        info!("Native batch from {caller:?} complete, refunded {refund}");
        Ok(())
    }

    /// Send fungible tokens. The caller must have approved the engine to spend at least the
    /// total of `amounts`.
    pub fn send_fungible(
        &self,
        caller: Address,
        token: Address,
        recipients: &[Address],
        amounts: &[Amount],
    ) -> Result<()> {
        let legs =
            validation::legs(recipients, amounts, RECIPIENTS_AND_VALUES, self.config.max_legs)?;
        let engine = self.address();
        info!(
            "Sending fungible token {token:?} from {caller:?} to {} recipients",
            legs.len()
        );

        self.ledger.atomically(|gateway| -> Result<()> {
            for (i, leg) in legs.iter().enumerate() {
                debug!(
                    "Leg {i}: sending {} of {token:?} to {:?}",
                    leg.value, leg.recipient
                );
                gateway
                    .token_transfer_from(token, engine, caller, leg.recipient, leg.value)
                    .inspect_err(|err| error!("Leg {i} to {:?} failed: {err}", leg.recipient))?;
            }
            Ok(())
        })?;

        info!("Fungible batch of {token:?} from {caller:?} complete");
        Ok(())
    }

    /// Send non-fungible tokens, one id per recipient. The caller must have approved the
    /// engine for all of its tokens. Duplicate ids are not filtered out.
    pub fn send_nonfungible(
        &self,
        caller: Address,
        token: Address,
        recipients: &[Address],
        ids: &[TokenId],
    ) -> Result<()> {
        let legs = validation::legs(recipients, ids, RECIPIENTS_AND_IDS, self.config.max_legs)?;
        let engine = self.address();
        info!(
            "Sending non-fungible token {token:?} from {caller:?} to {} recipients",
            legs.len()
        );

        self.ledger.atomically(|gateway| -> Result<()> {
            for (i, Leg { recipient, value: id }) in legs.iter().enumerate() {
                debug!("Leg {i}: sending id {id} of {token:?} to {recipient:?}");
                gateway
                    .nft_transfer_from(token, engine, caller, *recipient, *id)
                    .inspect_err(|err| error!("Leg {i} to {recipient:?} failed: {err}"))?;
            }
            Ok(())
        })?;

        info!("Non-fungible batch of {token:?} from {caller:?} complete");
        Ok(())
    }

    /// Send multi-token units: `recipients[i]` receives `amounts[i]` of `ids[i]`. The caller
    /// must have approved the engine for all of its tokens.
    pub fn send_multitoken(
        &self,
        caller: Address,
        token: Address,
        recipients: &[Address],
        ids: &[TokenId],
        amounts: &[Amount],
    ) -> Result<()> {
        let legs = validation::multi_token_legs(recipients, ids, amounts, self.config.max_legs)?;
        let engine = self.address();
        info!(
            "Sending multi-token {token:?} from {caller:?} to {} recipients",
            legs.len()
        );

        self.ledger.atomically(|gateway| -> Result<()> {
            for (i, leg) in legs.iter().enumerate() {
                debug!(
                    "Leg {i}: sending {} of id {} of {token:?} to {:?}",
                    leg.amount, leg.id, leg.recipient
                );
                gateway
                    .multi_token_transfer_from(
                        token,
                        engine,
                        caller,
                        leg.recipient,
                        leg.id,
                        leg.amount,
                    )
                    .inspect_err(|err| error!("Leg {i} to {:?} failed: {err}", leg.recipient))?;
            }
            Ok(())
        })?;

        info!("Multi-token batch of {token:?} from {caller:?} complete");
        Ok(())
    }

    /// Run a batch request with the routine for its asset kind.
    pub fn execute(&self, caller: Address, request: &BatchRequest) -> Result<()> {
        match request {
            BatchRequest::Native {
                recipients,
                values,
                escrowed,
            } => self.send_native(caller, recipients, values, *escrowed),
            BatchRequest::Fungible {
                token,
                recipients,
                amounts,
            } => self.send_fungible(caller, *token, recipients, amounts),
            BatchRequest::NonFungible {
                token,
                recipients,
                ids,
            } => self.send_nonfungible(caller, *token, recipients, ids),
            BatchRequest::MultiToken {
                token,
                recipients,
                ids,
                amounts,
            } => self.send_multitoken(caller, *token, recipients, ids, amounts),
        }
    }

    /// Decode transaction input and run it, with `value` attached to the call.
    pub fn execute_calldata(&self, caller: Address, input: &[u8], value: Amount) -> Result<()> {
        let request = BatchRequest::from_calldata(input, value)?;
        debug!("Decoded {} batch from calldata", request.kind());
        self.execute(caller, &request)
    }
}

fn total(legs: &[Leg]) -> Result<Amount> {
    legs.iter().try_fold(Amount::ZERO, |sum, leg| {
        sum.checked_add(leg.value).ok_or(Error::NumericOverflow)
    })
}
