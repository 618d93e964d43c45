//! Hiding secrets before they reach logs or error messages.
//!
//! Masking is a best-effort logging aid, not a security boundary: the
//! unmasked values still live in the client and in error objects for
//! programmatic use. What it guarantees is that the text the client
//! *prints* does not leak passwords, tokens or session ids.

/// Replacement shown in place of a hidden value.
pub const HIDING_MASK: &str = "********";

/// Masking policy, injected into [`Masker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskConfig {
    /// Text substituted for the hidden part of a value.
    pub mask: String,

    /// Values this long or shorter are hidden entirely, whatever the
    /// requested show length.
    ///
    /// Default: 16.
    pub min_reveal_len: usize,

    /// Characters kept at each end when redacting JSON fields.
    ///
    /// Default: 4.
    pub show_len: usize,

    /// Field names whose string values are always masked.
    pub fields: Vec<String>,

    /// Field names masked only when the value looks like a session id
    /// (32 ASCII alphanumerics), e.g. the `result` of `user.login`.
    pub session_like_fields: Vec<String>,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask: HIDING_MASK.to_string(),
            min_reveal_len: 16,
            show_len: 4,
            fields: ["auth", "token", "password", "sessionid"]
                .into_iter()
                .map(String::from)
                .collect(),
            session_like_fields: vec!["result".to_string()],
        }
    }
}

/// Applies a [`MaskConfig`] to strings and JSON documents.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Default)]
pub struct Masker {
    config: MaskConfig,
}

#[cfg(feature = "json")]
impl Masker {
    /// Creates a masker with the given policy.
    pub fn new(config: MaskConfig) -> Self {
        Self { config }
    }

    /// The policy in use.
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Keeps `show_len` characters at each end of `value` and hides the
    /// middle.
    ///
    /// - `show_len == 0` disables masking and returns `value` unchanged.
    /// - Values no longer than `min_reveal_len`, or no longer than
    ///   `show_len`, are replaced by the mask alone.
    ///
    /// ```rust
    /// use zabbix_protocol::{Masker, HIDING_MASK};
    ///
    /// let masker = Masker::default();
    /// assert_eq!(
    ///     masker.mask("ZWvaGS5SzNGaR990f", 4),
    ///     format!("ZWva{HIDING_MASK}990f"),
    /// );
    /// assert_eq!(masker.mask("lZSwaQ", 5), HIDING_MASK);
    /// ```
    pub fn mask(&self, value: &str, show_len: usize) -> String {
        if show_len == 0 {
            return value.to_string();
        }

        let len = value.chars().count();
        if len <= self.config.min_reveal_len || len <= show_len {
            return self.config.mask.clone();
        }

        let prefix: String = value.chars().take(show_len).collect();
        let suffix: String = value.chars().skip(len - show_len).collect();
        format!("{prefix}{}{suffix}", self.config.mask)
    }

    /// Masks secret fields inside a JSON document.
    ///
    /// Only the secret string values are rewritten; key order, whitespace
    /// and every other byte of `json_text` are kept as they are. Text that
    /// is not valid JSON is returned unchanged.
    pub fn redact(&self, json_text: &str) -> String {
        if serde_json::from_str::<serde::de::IgnoredAny>(json_text).is_err() {
            return json_text.to_string();
        }

        let bytes = json_text.as_bytes();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut out = String::with_capacity(json_text.len());
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'{' => scopes.push(Scope::Object {
                    key: None,
                    expect_key: true,
                }),
                b'[' => scopes.push(Scope::Array),
                b'}' | b']' => {
                    scopes.pop();
                }
                b',' => {
                    if let Some(Scope::Object { expect_key, .. }) = scopes.last_mut() {
                        *expect_key = true;
                    }
                }
                b'"' => {
                    let end = string_end(bytes, i);
                    let literal = &json_text[i..end];
                    let decoded: String =
                        serde_json::from_str(literal).unwrap_or_default();

                    match scopes.last_mut() {
                        Some(Scope::Object { key, expect_key }) if *expect_key => {
                            *key = Some(decoded);
                            *expect_key = false;
                        }
                        Some(Scope::Object { key: Some(key), .. })
                            if self.is_secret(key.as_str(), &decoded) =>
                        {
                            let masked = self.mask(&decoded, self.config.show_len);
                            out.push_str(&json_text[copied..i]);
                            out.push_str(
                                &serde_json::to_string(&masked).unwrap_or_default(),
                            );
                            copied = end;
                        }
                        _ => {}
                    }

                    i = end;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }

        out.push_str(&json_text[copied..]);
        out
    }

    fn is_secret(&self, key: &str, value: &str) -> bool {
        if self.config.fields.iter().any(|f| f == key) {
            return true;
        }
        self.config.session_like_fields.iter().any(|f| f == key)
            && value.len() == 32
            && value.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

/// Where the scanner in [`Masker::redact`] currently is.
#[cfg(feature = "json")]
enum Scope {
    Object {
        /// The key of the member being read.
        key: Option<String>,
        /// Next string is a key rather than a value.
        expect_key: bool,
    },
    Array,
}

/// Index just past the string literal opening at `start`.
#[cfg(feature = "json")]
fn string_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Returns the first `max_len` characters of `value`, followed by `...`
/// when `add_dots` is set and something was actually cut.
///
/// ```rust
/// use zabbix_protocol::truncate;
///
/// assert_eq!(truncate("ZWvaGS5SzNGaR990f", 4, true), "ZWva...");
/// assert_eq!(truncate("short", 20, true), "short");
/// ```
pub fn truncate(value: &str, max_len: usize, add_dots: bool) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }

    let mut cut: String = value.chars().take(max_len).collect();
    if add_dots {
        cut.push_str("...");
    }
    cut
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    fn masker() -> Masker {
        Masker::default()
    }

    // =====================================================================
    // mask()
    // =====================================================================

    #[test]
    fn test_mask_cases() {
        let m = HIDING_MASK;
        let cases = [
            ("lZSwaQ", 5, m.to_string()),
            ("ZWvaGS5SzNGaR990f", 4, format!("ZWva{m}990f")),
            ("KZneJzgRzdlWcUjJj", 10, format!("KZneJzgRzd{m}RzdlWcUjJj")),
            ("g5imzEr7TPcBG47fa", 20, m.to_string()),
            ("In8y4eGughjBNSqEGPcqzejToVUT3OA4q5", 2, format!("In{m}q5")),
            ("Z8pZom5EVbRZ0W5wz", 0, "Z8pZom5EVbRZ0W5wz".to_string()),
        ];

        for (input, show_len, expected) in cases {
            assert_eq!(
                masker().mask(input, show_len),
                expected,
                "input {input:?} show_len {show_len}"
            );
        }
    }

    #[test]
    fn test_mask_empty_string_with_show_len_is_mask() {
        assert_eq!(masker().mask("", 4), HIDING_MASK);
    }

    #[test]
    fn test_mask_uses_injected_mask_token() {
        let masker = Masker::new(MaskConfig {
            mask: "<hidden>".into(),
            min_reveal_len: 4,
            ..MaskConfig::default()
        });

        assert_eq!(masker.mask("abcdefgh", 2), "ab<hidden>gh");
        assert_eq!(masker.mask("abcd", 1), "<hidden>");
    }

    #[test]
    fn test_mask_counts_characters_not_bytes() {
        let masker = Masker::new(MaskConfig {
            min_reveal_len: 2,
            ..MaskConfig::default()
        });

        assert_eq!(masker.mask("äöüßäöüß", 1), format!("ä{HIDING_MASK}ß"));
    }

    // =====================================================================
    // truncate()
    // =====================================================================

    #[test]
    fn test_truncate_cases() {
        let cases = [
            ("ZWvaGS5SzNGaR990f", 4, true, "ZWva..."),
            ("KZneJzgRzdlWcUjJj", 10, false, "KZneJzgRzd"),
            ("g5imzEr7TPcBG47fa", 20, true, "g5imzEr7TPcBG47fa"),
            (
                "In8y4eGughjBNSqEGPcqzejToVUT3OA4q5",
                20,
                true,
                "In8y4eGughjBNSqEGPcq...",
            ),
            ("Z8pZom5EVbRZ0W5wz", 0, true, "..."),
            ("0gtRoOSbHLZqYR3BF", 0, false, ""),
        ];

        for (input, max_len, dots, expected) in cases {
            assert_eq!(
                truncate(input, max_len, dots),
                expected,
                "input {input:?} max_len {max_len}"
            );
        }
    }

    // =====================================================================
    // redact()
    // =====================================================================

    #[test]
    fn test_redact_cases() {
        let m = HIDING_MASK;
        let cases = [
            (
                r#"{"auth":"q2BTIw85kqmjtXl3","token":"jZAC51wHuWdwvQnx"}"#,
                format!(r#"{{"auth":"{m}","token":"{m}"}}"#),
            ),
            (
                r#"{"token":"jZAC51wHuWdwvQnxwbP2T55vh6R5R2uW"}"#,
                format!(r#"{{"token":"jZAC{m}R2uW"}}"#),
            ),
            (
                r#"{"auth":"q2BTIw85kqmjtXl3zCgSSR26gwCGVFMK"}"#,
                format!(r#"{{"auth":"q2BT{m}VFMK"}}"#),
            ),
            (
                r#"{"sessionid":"p1xqXSf2HhYWa2ml6R5R2uWwbP2T55vh"}"#,
                format!(r#"{{"sessionid":"p1xq{m}55vh"}}"#),
            ),
            (
                r#"{"password":"HlphkcKgQKvofQHP"}"#,
                format!(r#"{{"password":"{m}"}}"#),
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(masker().redact(input), expected, "input {input}");
        }
    }

    #[test]
    fn test_redact_preserves_structure_and_key_order() {
        let input = r#"{"jsonrpc":"2.0","method":"host.get","params":{"output":["hostid","name"],"limit":5},"id":"1","auth":"q2BTIw85kqmjtXl3zCgSSR26gwCGVFMK"}"#;

        let output = masker().redact(input);

        assert_eq!(
            output,
            format!(
                r#"{{"jsonrpc":"2.0","method":"host.get","params":{{"output":["hostid","name"],"limit":5}},"id":"1","auth":"q2BT{HIDING_MASK}VFMK"}}"#
            )
        );
    }

    #[test]
    fn test_redact_nested_password() {
        let input = r#"{"method":"user.login","params":{"username":"Admin","password":"zabbix"}}"#;

        let output = masker().redact(input);

        assert_eq!(
            output,
            format!(
                r#"{{"method":"user.login","params":{{"username":"Admin","password":"{HIDING_MASK}"}}}}"#
            )
        );
    }

    #[test]
    fn test_redact_session_like_result_only() {
        let session = r#"{"result":"cc364fb50199c5e305aa91785b7e49a0"}"#;
        let version = r#"{"result":"7.0.0"}"#;

        assert_eq!(
            masker().redact(session),
            format!(r#"{{"result":"cc36{HIDING_MASK}49a0"}}"#)
        );
        assert_eq!(masker().redact(version), version);
    }

    #[test]
    fn test_redact_inside_arrays() {
        let input = r#"[{"token":"abc"},{"name":"x"}]"#;

        assert_eq!(
            masker().redact(input),
            format!(r#"[{{"token":"{HIDING_MASK}"}},{{"name":"x"}}]"#)
        );
    }

    #[test]
    fn test_redact_keeps_original_formatting() {
        let input = r#"{"auth": "q2BTIw85kqmjtXl3zCgSSR26gwCGVFMK", "id": 1}"#;

        assert_eq!(
            masker().redact(input),
            format!(r#"{{"auth": "q2BT{HIDING_MASK}VFMK", "id": 1}}"#)
        );
    }

    #[test]
    fn test_redact_pretty_printed_nested_document() {
        let input = "{\n  \"params\": {\n    \"user\": \"Admin\",\n    \"password\": \"zabbix\"\n  },\n  \"id\": \"x\"\n}";

        assert_eq!(
            masker().redact(input),
            format!("{{\n  \"params\": {{\n    \"user\": \"Admin\",\n    \"password\": \"{HIDING_MASK}\"\n  }},\n  \"id\": \"x\"\n}}")
        );
    }

    #[test]
    fn test_redact_escaped_strings_and_secret_named_values() {
        // A value that equals a secret field name is not a key.
        let input = r#"{"note": "say \"token\"", "name": "token", "token": "a\"b"}"#;

        assert_eq!(
            masker().redact(input),
            format!(r#"{{"note": "say \"token\"", "name": "token", "token": "{HIDING_MASK}"}}"#)
        );
    }

    #[test]
    fn test_redact_array_of_strings_untouched() {
        let input = r#"{"output": ["auth", "token"], "auth": "sid"}"#;

        assert_eq!(
            masker().redact(input),
            format!(r#"{{"output": ["auth", "token"], "auth": "{HIDING_MASK}"}}"#)
        );
    }

    #[test]
    fn test_redact_invalid_json_returned_unchanged() {
        let input = "password=hunter2, not json";

        assert_eq!(masker().redact(input), input);
    }

    #[test]
    fn test_redact_non_string_secret_left_alone() {
        let input = r#"{"auth":null,"token":42}"#;

        assert_eq!(masker().redact(input), input);
    }
}
