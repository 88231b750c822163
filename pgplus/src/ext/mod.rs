
/// Helper trait to [`Display`][std::fmt::Display] bytes.
pub trait FmtExt {
    /// Lossy [`Display`][std::fmt::Display] bytes.
    fn lossy(&self) -> LossyFmt<'_>;
}

/// Lossy [`Display`][std::fmt::Display] implementation for bytes.
pub struct LossyFmt<'a>(pub &'a [u8]);

impl FmtExt for [u8] {
    fn lossy(&self) -> LossyFmt<'_> {
        LossyFmt(self)
    }
}

impl std::fmt::Display for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:x}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b\"{self}\"")
    }
}

/// Text scanning helpers shared by the composite codecs.
pub trait StrExt {
    /// Split at the first occurrence of `delim`, returning the whole input when
    /// `delim` is absent.
    fn leading_token(&self, delim: char) -> &str;

    /// Returns `true` if self is a decimal integer with an optional leading `-`.
    fn is_integer(&self) -> bool;
}

impl StrExt for str {
    fn leading_token(&self, delim: char) -> &str {
        match self.split_once(delim) {
            Some((token, _)) => token,
            None => self,
        }
    }

    fn is_integer(&self) -> bool {
        let digits = self.strip_prefix('-').unwrap_or(self);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod test {
    use super::{FmtExt, StrExt};

    #[test]
    fn lossy_escapes_control_bytes() {
        assert_eq!(b"a\x00b".lossy().to_string(), "a\\x0b");
        assert_eq!(format!("{:?}", b"(1,2)".lossy()), "b\"(1,2)\"");
    }

    #[test]
    fn leading_token() {
        assert_eq!("14 days".leading_token(' '), "14");
        assert_eq!("05:00:00".leading_token(':'), "05");
        assert_eq!("7".leading_token(' '), "7");
        assert!("-12".is_integer());
        assert!(!"-".is_integer());
        assert!(!"1.5".is_integer());
    }
}
