use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    AcceptOffer,
    CancelOffer,
    CreateOffer,
    AcceptAuction,
    CreateAuction,
    Mint,
}

impl FromStr for Flow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept-offer" => Ok(Flow::AcceptOffer),
            "cancel-offer" => Ok(Flow::CancelOffer),
            "create-offer" => Ok(Flow::CreateOffer),
            "accept-auction" => Ok(Flow::AcceptAuction),
            "create-auction" => Ok(Flow::CreateAuction),
            "mint" => Ok(Flow::Mint),
            _ => Err(()),
        }
    }
}

/// Progress of a transaction flow, mirroring the SDK step names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStep {
    Initial,
    ResolveCurrency,
    ResolveOffer,
    Upload,
    ApprovalSignature,
    ApprovalPending,
    Signature,
    TransactionSignature,
    TransactionPending,
    Ownership,
}

impl FromStr for TransactionStep {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = match s.to_ascii_uppercase().as_str() {
            "INITIAL" => TransactionStep::Initial,
            "RESOLVE_CURRENCY" => TransactionStep::ResolveCurrency,
            "RESOLVE_OFFER" => TransactionStep::ResolveOffer,
            "UPLOAD" => TransactionStep::Upload,
            "APPROVAL_SIGNATURE" => TransactionStep::ApprovalSignature,
            "APPROVAL_PENDING" => TransactionStep::ApprovalPending,
            "SIGNATURE" => TransactionStep::Signature,
            "TRANSACTION_SIGNATURE" => TransactionStep::TransactionSignature,
            "TRANSACTION_PENDING" => TransactionStep::TransactionPending,
            "OWNERSHIP" => TransactionStep::Ownership,
            _ => return Err(()),
        };
        Ok(step)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepIcon {
    Spinner,
    Wallet,
    Check,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisplayInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: StepIcon,
}

const fn info(title: &'static str, description: &'static str, icon: StepIcon) -> DisplayInfo {
    DisplayInfo {
        title,
        description,
        icon,
    }
}

/// Title, description and icon shown while `flow` is at `step`.
/// `None` for steps the flow never goes through.
pub fn display_info(flow: Flow, step: TransactionStep) -> Option<DisplayInfo> {
    use StepIcon::*;
    use TransactionStep::*;

    let display = match (flow, step) {
        (_, Initial) => info("Preparing", "Checking the details of your request.", Spinner),

        (Flow::AcceptOffer | Flow::CreateOffer, ResolveCurrency) => info(
            "Checking balance",
            "Verifying you hold enough of the currency.",
            Spinner,
        ),
        (Flow::AcceptOffer | Flow::CancelOffer | Flow::AcceptAuction, ResolveOffer) => info(
            "Fetching offer",
            "Loading the offer from the marketplace.",
            Spinner,
        ),
        (Flow::Mint, Upload) => info(
            "Uploading",
            "Uploading the files and metadata of your asset.",
            Spinner,
        ),

        (Flow::Mint | Flow::CancelOffer, ApprovalSignature) => return None,
        (_, ApprovalSignature) => info(
            "Approve the collection",
            "Sign the approval in your wallet to let the exchange move the asset.",
            Wallet,
        ),
        (Flow::Mint | Flow::CancelOffer, ApprovalPending) => return None,
        (_, ApprovalPending) => info(
            "Approval pending",
            "Waiting for the approval to be included in a block.",
            Spinner,
        ),

        (Flow::CreateOffer | Flow::CreateAuction, Signature) => info(
            "Sign the offer",
            "Sign the offer in your wallet. This does not cost any gas.",
            Wallet,
        ),

        (_, TransactionSignature) => info(
            "Confirm the transaction",
            "Confirm the transaction in your wallet.",
            Wallet,
        ),
        (_, TransactionPending) => info(
            "Transaction pending",
            "Waiting for the transaction to be included in a block.",
            Spinner,
        ),
        (Flow::AcceptOffer | Flow::AcceptAuction | Flow::Mint, Ownership) => info(
            "Updating ownership",
            "Waiting for the marketplace to index the new owner.",
            Check,
        ),

        _ => return None,
    };
    Some(display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_outside_the_flow_have_no_display() {
        assert!(display_info(Flow::CancelOffer, TransactionStep::ApprovalSignature).is_none());
        assert!(display_info(Flow::Mint, TransactionStep::ResolveOffer).is_none());
        assert!(display_info(Flow::CancelOffer, TransactionStep::Ownership).is_none());
    }

    #[test]
    fn parses_path_segments() {
        assert_eq!("create-auction".parse(), Ok(Flow::CreateAuction));
        assert_eq!(
            "transaction_pending".parse(),
            Ok(TransactionStep::TransactionPending)
        );
        assert!("burn".parse::<Flow>().is_err());
    }
}
