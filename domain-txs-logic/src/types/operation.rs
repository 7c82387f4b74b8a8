use crate::error::DecodeError;
use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Operation reported by the backend for a domain transaction.
///
/// The wire value is the variant name. There is deliberately no catch-all
/// variant: an unrecognised value is a [`DecodeError::UnknownOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
pub enum TxOperation {
    BestowDomain,
    ClaimDomain,
    MintDomain,
    TransferDomain,
    ReturnDomain,
    BurnDomain,
    UpgradeDomain,
    SetRecords,
    ResetRecords,
    SetOwner,
    SetResolver,
    SetApprovalForAll,
    ApproveOperator,
    SetReverseResolution,
    RemoveReverseResolution,
    DepositToPolygon,
    WithdrawFromPolygon,
    BridgeToL2,
    BridgeToL1,
    CreateSubdomain,
    EnsCommit,
    EnsRegister,
    EnsRenew,
    EnsSetPrimaryName,
    EnsSetRecords,
}

impl TxOperation {
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        Self::from_str(value).map_err(|_| DecodeError::UnknownOperation(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
pub enum TransactionType {
    ZilTx,
    EthTx,
    MaticTx,
}

impl TransactionType {
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        Self::from_str(value).map_err(|_| DecodeError::UnknownTransactionType(value.to_string()))
    }
}

/// Coarse status reported by the backend; only its pending bit is kept on
/// the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum StatusGroup {
    Pending,
    Completed,
    Failed,
}

impl StatusGroup {
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        Self::from_str(value).map_err(|_| DecodeError::UnknownStatusGroup(value.to_string()))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, StatusGroup::Pending)
    }
}
