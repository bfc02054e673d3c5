// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

/// Remove every `open ... close` span from `text`.
///
/// A span ends at the first `close` after its `open`. An `open` without a
/// matching `close` is kept verbatim, as is everything after it.
fn strip_enclosed(text: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(open) {
        let body_start = start + open.len_utf8();
        let Some(body_len) = rest[body_start..].find(close) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[body_start + body_len + close.len_utf8()..];
    }
    out.push_str(rest);
    out
}

/// Reduce a command string to the header used as registry key.
///
/// In order: trim, uppercase, drop one trailing `?`, keep the first
/// whitespace-separated token, then remove `{...}` and `<...>` placeholders.
///
/// ```
/// use command_registry::normalize_header;
///
/// assert_eq!(normalize_header("horizontal:scale?"), "HORIZONTAL:SCALE");
/// assert_eq!(normalize_header("MATH<x>:DEFine {value}"), "MATH:DEFINE");
/// ```
pub fn normalize_header(command: &str) -> String {
    let upper = command.trim().to_uppercase();
    let without_query = upper.strip_suffix('?').unwrap_or(&upper);
    let header = without_query.split_whitespace().next().unwrap_or_default();
    let header = strip_enclosed(header, '{', '}');
    strip_enclosed(&header, '<', '>')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_enclosed() {
        assert_eq!(strip_enclosed("CH<x>:SCALE", '<', '>'), "CH:SCALE");
        assert_eq!(strip_enclosed("A{b}C{d}", '{', '}'), "AC");
        assert_eq!(strip_enclosed("A{{b}C", '{', '}'), "AC");
        assert_eq!(strip_enclosed("A{bC", '{', '}'), "A{bC");
        assert_eq!(strip_enclosed("A{b}C{d", '{', '}'), "AC{d");
        assert_eq!(strip_enclosed("", '<', '>'), "");
    }

    #[test]
    fn test_query_and_case_are_ignored() {
        assert_eq!(
            normalize_header("horizontal:scale?"),
            normalize_header("HORIZONTAL:SCALE")
        );
        assert_eq!(normalize_header("  *idn?  "), "*IDN");
    }

    #[test]
    fn test_placeholders_and_arguments_are_dropped() {
        assert_eq!(normalize_header("MATH<x>:DEFine {value}"), "MATH:DEFINE");
        assert_eq!(normalize_header("CH<x>:SCAle 1.0E-3"), "CH:SCALE");
        assert_eq!(normalize_header("DISplay:{WAVEView1}:VIEWStyle"), "DISPLAY::VIEWSTYLE");
        assert_eq!(normalize_header("SAVE:IMAGe \"C:/tmp/a.png\""), "SAVE:IMAGE");
    }

    #[test]
    fn test_query_mark_is_only_stripped_at_the_end() {
        assert_eq!(normalize_header("MEASUrement:MEAS<x>:VALue? CH1"), "MEASUREMENT:MEAS:VALUE?");
        assert_eq!(normalize_header("*OPC?"), "*OPC");
    }

    #[test]
    fn test_query_with_argument_needs_second_pass() {
        // The query mark is inside the header token, so only a second pass strips it
        let once = normalize_header("MEASUrement:MEAS<x>:VALue? CH1");
        assert_eq!(once, "MEASUREMENT:MEAS:VALUE?");
        assert_eq!(normalize_header(&once), "MEASUREMENT:MEAS:VALUE");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_header(""), "");
        assert_eq!(normalize_header("   "), "");
        assert_eq!(normalize_header("?"), "");
    }

    fn command_string() -> impl Strategy<Value = String> {
        (
            "[A-Za-z*][A-Za-z0-9:]{0,12}",
            proptest::option::of("<[a-z]{1,3}>"),
            "[A-Za-z0-9:]{0,8}",
            proptest::option::of(" \\{[a-z|]{1,8}\\}"),
            proptest::bool::ANY,
        )
            .prop_map(|(head, angle, tail, arg, query)| {
                let mut out = head;
                out.push_str(&angle.unwrap_or_default());
                out.push_str(&tail);
                out.push_str(&arg.unwrap_or_default());
                if query {
                    out.push('?');
                }
                out
            })
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(command in command_string()) {
            let once = normalize_header(&command);
            prop_assert_eq!(normalize_header(&once), once);
        }

        #[test]
        fn test_normalized_header_has_no_placeholders(command in command_string()) {
            let header = normalize_header(&command);
            prop_assert!(
                !header.contains(['<', '>', '{', '}']),
                "placeholder left in {}",
                header
            );
            prop_assert!(!header.contains(char::is_whitespace), "whitespace left in {}", header);
        }
    }
}
