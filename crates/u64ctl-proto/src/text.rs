//! `{name}` control-macro decoding for keyboard injection.
//!
//! Injected text is sent to the device as raw ASCII plus control bytes. A
//! macro like `{nl}` stands in for the control byte the firmware expects
//! (0x0A here), since those bytes can't be typed on a command line.

use crate::error::{ProtocolError, Result};

/// Fixed control table: lowercase macro name to device byte code.
const CTRL_TABLE: &[(&str, u8)] = &[("", 0x00), ("nl", 0x0A), ("cr", 0x0D)];

/// What to do with a macro name missing from the control table.
///
/// Older protocol clients errored here, newer ones silently drop the macro.
/// Lenient is the default; pass [`MacroPolicy::Strict`] to
/// [`decode_text_with`] to get the old behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MacroPolicy {
    /// Unknown macros are dropped with no output.
    #[default]
    Lenient,
    /// Unknown macros are an error.
    Strict,
}

fn control_code(name: &str) -> Option<u8> {
    CTRL_TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, code)| *code)
}

/// Decode macro text into device bytes, dropping unknown macros.
pub fn decode_text(text: &str) -> Result<Vec<u8>> {
    decode_text_with(text, MacroPolicy::Lenient)
}

/// Decode macro text into device bytes with an explicit unknown-macro policy.
///
/// Literal runs pass through as their ASCII bytes; `{name}` runs (matched
/// case-insensitively) are replaced by the mapped control byte. Input must
/// be ASCII. Unbalanced or unterminated braces are
/// [`ProtocolError::MalformedMacro`].
pub fn decode_text_with(text: &str, policy: MacroPolicy) -> Result<Vec<u8>> {
    if let Some(index) = text.bytes().position(|b| !b.is_ascii()) {
        return Err(ProtocolError::NonAsciiText { index });
    }

    let mut out = Vec::with_capacity(text.len());
    let mut name = String::new();
    let mut in_macro = false;
    let mut open_index = 0;

    for (index, byte) in text.bytes().enumerate() {
        match byte {
            b'{' => {
                if in_macro {
                    return Err(ProtocolError::MalformedMacro {
                        index,
                        detail: "'{' inside a macro",
                    });
                }
                in_macro = true;
                open_index = index;
                name.clear();
            }
            b'}' => {
                if !in_macro {
                    return Err(ProtocolError::MalformedMacro {
                        index,
                        detail: "'}' without matching '{'",
                    });
                }
                in_macro = false;
                match control_code(&name.to_ascii_lowercase()) {
                    Some(code) => out.push(code),
                    None if policy == MacroPolicy::Strict => {
                        return Err(ProtocolError::UnknownMacro {
                            name: name.to_ascii_lowercase(),
                        });
                    }
                    None => {} // lenient: drop
                }
            }
            _ if in_macro => name.push(byte as char),
            _ => out.push(byte),
        }
    }

    if in_macro {
        return Err(ProtocolError::MalformedMacro {
            index: open_index,
            detail: "unterminated macro at end of input",
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_text_passes_through() {
        assert_eq!(decode_text("LOAD \"*\",8,1").unwrap(), b"LOAD \"*\",8,1");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(decode_text("").unwrap(), b"");
    }

    #[test]
    fn known_macro_expands() {
        assert_eq!(decode_text("HELLO{nl}WORLD").unwrap(), b"HELLO\x0AWORLD");
    }

    #[test]
    fn macro_names_are_case_insensitive() {
        assert_eq!(decode_text("{CR}{Nl}").unwrap(), [0x0D, 0x0A]);
    }

    #[test]
    fn empty_macro_maps_to_nul() {
        assert_eq!(decode_text("a{}b").unwrap(), b"a\x00b");
    }

    #[test]
    fn unknown_macro_dropped_when_lenient() {
        assert_eq!(decode_text("A{unknown}B").unwrap(), b"AB");
    }

    #[test]
    fn unknown_macro_errors_when_strict() {
        let err = decode_text_with("A{unknown}B", MacroPolicy::Strict).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownMacro { name } if name == "unknown"));
    }

    #[test]
    fn nested_open_is_malformed() {
        let err = decode_text("A{B{C}").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MalformedMacro { index: 3, .. }
        ));
    }

    #[test]
    fn stray_close_is_malformed() {
        let err = decode_text("AB}").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MalformedMacro { index: 2, .. }
        ));
    }

    #[test]
    fn unterminated_macro_is_malformed() {
        let err = decode_text("AB{cr").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MalformedMacro { index: 2, .. }
        ));
    }

    #[test]
    fn non_ascii_input_rejected() {
        let err = decode_text("héllo").unwrap_err();
        assert!(matches!(err, ProtocolError::NonAsciiText { index: 1 }));
    }

    #[test]
    fn adjacent_macros_and_literals() {
        assert_eq!(
            decode_text("RUN{cr}{nl}GO").unwrap(),
            [b'R', b'U', b'N', 0x0D, 0x0A, b'G', b'O']
        );
    }
}
