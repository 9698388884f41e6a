use std::fmt::Display;
use std::str::{self, FromStr};

use super::{Error, Result};

pub trait Verify {
    /// Verifying that this struct is sane
    ///
    /// NB: This is called after defaults and implicits are filled in.
    fn verify(&self) -> Result<()>;
}

/// Types that live as a single line of text inside larger documents
///
/// Rendering never fails, parsing may. Both directions go through the
/// `Display` and `FromStr` implementations of the type.
pub trait TextMarshal: Display + FromStr<Err = Error> {
    /// Textual encoding of the value
    fn marshal_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Replace the value with the one encoded in `data`
    ///
    /// The value is left untouched if `data` does not parse.
    fn unmarshal_text(&mut self, data: &[u8]) -> Result<()> {
        let s = str::from_utf8(data)?;
        *self = s.parse()?;
        Ok(())
    }
}
