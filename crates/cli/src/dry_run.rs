use reqwest::Request;
use serde_json::{Map, Value, json};

/// Describe a built request without sending it. Header values pass through
/// [`logicapp_util::redact_sensitive`].
pub fn describe_request(request: &Request, body: &Value) -> Value {
    let mut headers_out = Map::new();
    for (name, value) in request.headers().iter() {
        let val = value.to_str().unwrap_or("");
        let line = format!("{}: {}", name.as_str(), val);
        let redacted = logicapp_util::redact_sensitive(&line);
        let out_val = redacted
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .unwrap_or("")
            .to_string();
        headers_out.insert(name.as_str().to_string(), Value::String(out_val));
    }

    json!({
        "method": request.method().as_str(),
        "url": logicapp_util::redact_sensitive(request.url().as_str()),
        "headers": headers_out,
        "body": body,
    })
}
