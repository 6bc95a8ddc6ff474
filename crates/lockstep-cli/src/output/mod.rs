use serde::Serialize;

pub mod table;

/// Render a serializable value as pretty JSON.
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print a rendered block to stdout.
pub fn emit(rendered: &str) {
    if !rendered.is_empty() {
        println!("{rendered}");
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render_json;

    #[derive(Serialize)]
    struct Example {
        name: &'static str,
        line: usize,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            name: "port",
            line: 7,
        };
        let out = render_json(&value).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["name"], "port");
        assert_eq!(parsed["line"], 7);
    }
}
