// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! ABI call data for the batch entry points, for submission through an external signer.

use crate::common::{Address, Amount, Calldata};
use crate::error::{Error, Result};
use crate::request::{AssetKind, BatchRequest};
use alloy::sol;
use alloy::sol_types::SolInterface;
use IMultiSender::IMultiSenderCalls;

sol!(
    #[allow(missing_docs)]
    interface IMultiSender {
        function sendETH(address[] calldata recipients, uint256[] calldata values) external payable;
        function sendERC20(address token, address[] calldata recipients, uint256[] calldata values) external;
        function sendERC721(address token, address[] calldata recipients, uint256[] calldata ids) external;
        function sendERC1155(address token, address[] calldata recipients, uint256[] calldata ids, uint256[] calldata values) external;
    }
);

impl From<&BatchRequest> for IMultiSenderCalls {
    fn from(request: &BatchRequest) -> Self {
        match request.clone() {
            BatchRequest::Native {
                recipients, values, ..
            } => IMultiSenderCalls::sendETH(IMultiSender::sendETHCall { recipients, values }),
            BatchRequest::Fungible {
                token,
                recipients,
                amounts,
            } => IMultiSenderCalls::sendERC20(IMultiSender::sendERC20Call {
                token,
                recipients,
                values: amounts,
            }),
            BatchRequest::NonFungible {
                token,
                recipients,
                ids,
            } => IMultiSenderCalls::sendERC721(IMultiSender::sendERC721Call {
                token,
                recipients,
                ids,
            }),
            BatchRequest::MultiToken {
                token,
                recipients,
                ids,
                amounts,
            } => IMultiSenderCalls::sendERC1155(IMultiSender::sendERC1155Call {
                token,
                recipients,
                ids,
                values: amounts,
            }),
        }
    }
}

impl BatchRequest {
    /// Returns the transaction input for this request. Lengths are not checked here.
    pub fn calldata(&self) -> Calldata {
        IMultiSenderCalls::from(self).abi_encode().into()
    }

    /// Decode transaction input sent to the engine with `value` attached.
    pub fn from_calldata(input: &[u8], value: Amount) -> Result<Self> {
        let call = IMultiSenderCalls::abi_decode(input, true).map_err(|err| {
            warn!("Could not decode batch calldata: {err}");
            Error::InvalidCalldata(err.to_string())
        })?;

        let request = match call {
            IMultiSenderCalls::sendETH(call) => BatchRequest::Native {
                recipients: call.recipients,
                values: call.values,
                escrowed: value,
            },
            IMultiSenderCalls::sendERC20(call) => BatchRequest::Fungible {
                token: call.token,
                recipients: call.recipients,
                amounts: call.values,
            },
            IMultiSenderCalls::sendERC721(call) => BatchRequest::NonFungible {
                token: call.token,
                recipients: call.recipients,
                ids: call.ids,
            },
            IMultiSenderCalls::sendERC1155(call) => BatchRequest::MultiToken {
                token: call.token,
                recipients: call.recipients,
                ids: call.ids,
                amounts: call.values,
            },
        };

        if request.kind() != AssetKind::NativeCurrency && !value.is_zero() {
            return Err(Error::InvalidCalldata(format!(
                "{} batches do not accept attached value",
                request.kind()
            )));
        }
        Ok(request)
    }
}

/// Send a batch through the engine at `engine_address`.
///
/// Returns the transaction calldata (input, to, value).
pub fn send_calldata(
    engine_address: Address,
    request: &BatchRequest,
) -> (Calldata, Address, Amount) {
    (request.calldata(), engine_address, request.attached_value())
}
