use serde_json::Value;

/// Print the command result as JSON. A terminal gets indented output; a pipe
/// gets one compact line per result so `mcx ... | jq` and log capture work.
pub fn print_json(value: &Value) {
    let pretty = atty::is(atty::Stream::Stdout);
    match render(value, pretty) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("could not render result as JSON: {e}"),
    }
}

fn render(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
