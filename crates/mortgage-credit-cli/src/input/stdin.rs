use serde_json::Value;
use std::io::{self, Read};

/// Request document piped on stdin, as JSON or YAML. An interactive terminal
/// or blank input yields `None` so the command falls back to its flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().lock().read_to_string(&mut raw)?;
    parse_piped(&raw)
}

fn parse_piped(raw: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let body = raw.trim();
    if body.is_empty() {
        return Ok(None);
    }

    if body.starts_with('{') || body.starts_with('[') {
        let value = serde_json::from_str(body).map_err(|e| format!("stdin is not valid JSON: {e}"))?;
        return Ok(Some(value));
    }

    let value: Value =
        serde_yaml::from_str(body).map_err(|e| format!("stdin is neither JSON nor YAML: {e}"))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_means_no_document() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }

    #[test]
    fn test_json_request() {
        let v = parse_piped(r#"{"loan_amount": "100000000", "term_years": 20}"#)
            .unwrap()
            .unwrap();
        assert_eq!(v["term_years"], 20);
    }

    #[test]
    fn test_yaml_request() {
        let yaml = "client:\n  rut: 12.345.678-5\n  age: 40\nassertions:\n  r1PaymentToIncome: true\n";
        let v = parse_piped(yaml).unwrap().unwrap();
        assert_eq!(v["client"]["rut"], "12.345.678-5");
        assert_eq!(v["assertions"]["r1PaymentToIncome"], true);
    }

    #[test]
    fn test_broken_json_is_reported() {
        let err = parse_piped("{\"term_years\": ").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
