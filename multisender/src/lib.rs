// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Atomic batch distribution of native currency, fungible, non-fungible and multi-token
//! assets from one sender to many recipients.

#[macro_use]
extern crate tracing;

pub mod calldata;
pub mod common;
pub mod config;
mod engine;
mod error;
pub mod ledger;
mod request;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use engine::MultiSender;
pub use error::{Error, Result};
pub use request::{AssetKind, BatchRequest, Leg, MultiTokenLeg};
