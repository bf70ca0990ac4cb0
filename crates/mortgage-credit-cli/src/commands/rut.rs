use clap::Args;
use serde_json::{json, Value};

use mortgage_credit_core::rut::{clean_rut, format_rut, Rut};

/// Arguments for RUT commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RutArgs {
    /// RUT in any common format (12.345.678-5, 12345678-5, 123456785)
    #[arg(long)]
    pub rut: String,
}

pub fn run_validate_rut(args: RutArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (valid, reason) = match Rut::parse(&args.rut) {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };
    Ok(json!({
        "rut": format_rut(&args.rut),
        "valid": valid,
        "reason": reason,
    }))
}

pub fn run_format_rut(args: RutArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rut = Rut::parse(&args.rut)?;
    Ok(json!({
        "formatted": rut.to_string(),
        "clean": clean_rut(&args.rut),
    }))
}
