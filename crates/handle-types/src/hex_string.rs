// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Hex string validation
//!
//! Asset names travel between providers either as UTF-8 display names or as the
//! hex encoding of their on-chain bytes. [`is_hex`] is the predicate every layer uses
//! to tell the two apart.

/// Check whether a string is a hex encoding of whole bytes
///
/// Returns `true` only when the string is non-empty, has an even length and every
/// character is in `0-9a-fA-F`. The empty string encodes no asset name and is
/// rejected.
///
/// # Examples
///
/// ```rust
/// use handle_types::is_hex;
///
/// assert!(is_hex("1a2b3c"));
/// assert!(!is_hex("1a2b3z"));
/// assert!(!is_hex("1a2b3"));
/// assert!(!is_hex(""));
/// ```
pub fn is_hex(value: &str) -> bool {
    !value.is_empty()
        && value.len().is_multiple_of(2)
        && value.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_even_length_hex() {
        assert!(is_hex("1a2b3c"));
        assert!(is_hex("74657374696e67"));
        assert!(is_hex("ABCDEF"));
        assert!(is_hex(
            "edca3d6a16195194ab8a950fea908f5d10421da0a4dabb6d687182f7460c0412"
        ));
        assert!(is_hex(
            "014bda083192a442034f307e2f63927aefb514500baa51c332b6974fb4ea0b199ab23024d9db9ce892cd925ac11ae7eddfe1a8ad13f0e13c89"
        ));
    }

    #[test]
    fn rejects_odd_length() {
        assert!(!is_hex("1a2b3"));
        assert!(!is_hex("e"));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!is_hex("1a2b3z"));
        assert!(!is_hex("#123"));
        assert!(!is_hex("myname"));
        assert!(!is_hex("0x1a2b"));
        assert!(!is_hex(
            "addr1q99a5zp3j2jyyq60xplz7cuj0thm29zspw49rsejk6t5ld82pvve4v3synvah88gjtxeykkprtn7mhlp4zk38u8p8jystp9rw9"
        ));
    }

    #[test]
    fn empty_string_is_not_hex() {
        assert!(!is_hex(""));
    }

    #[test]
    fn rejects_multibyte_characters() {
        // two chars but four bytes
        assert!(!is_hex("éé"));
    }
}
