use clap::Args;
use serde_json::{json, Value};

use mortgage_credit_core::documents::{required_documents, LoanType};

/// Arguments for the document requirement lookup
#[derive(Args)]
pub struct DocumentsArgs {
    /// Loan type, by wire name or bank label ("Primera Vivienda")
    #[arg(long)]
    pub loan_type: Option<LoanType>,
}

pub fn run_required_documents(args: DocumentsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let documents: Vec<Value> = required_documents(args.loan_type)
        .iter()
        .map(|kind| {
            json!({
                "document": kind,
                "label": kind.label(),
                "storage_key": kind.storage_key(),
            })
        })
        .collect();

    if documents.is_empty() {
        tracing::warn!("no loan type given; nothing is required yet");
    }

    Ok(json!({
        "loan_type": args.loan_type,
        "label": args.loan_type.map(LoanType::label),
        "documents": documents,
    }))
}
