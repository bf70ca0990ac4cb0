use clap::Args;
use serde_json::Value;

use mortgage_credit_core::evaluation::{apply_decision, evaluate_request, EvaluationInput};

use crate::input;

/// Arguments for credit request evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON/YAML document with `request`, `client`, `assertions` and
    /// optional `policy`
    #[arg(long)]
    pub input: Option<String>,

    /// Also report the status the request moves to
    #[arg(long)]
    pub with_status: bool,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let eval_input: EvaluationInput = input::read_document(args.input.as_deref())?
        .ok_or("--input file (or JSON on stdin) is required for evaluation")?;

    let output = evaluate_request(&eval_input)?;
    tracing::info!(
        decision = ?output.result.decision,
        missing = output.result.missing_assertions.len(),
        "request evaluated"
    );

    let mut value = serde_json::to_value(&output)?;
    if args.with_status {
        let next = apply_decision(eval_input.request.status, output.result.decision)?;
        if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
            result.insert("next_status".into(), serde_json::to_value(next)?);
        }
    }
    Ok(value)
}
