//! Text arguments to single-byte character arguments.
//!
//! Character arguments of the native routines (`JOBZ`, `UPLO`, `TRANS`, ...)
//! are Fortran `CHARACTER` values, one byte per character.

use crate::error::{LowlevelError, Result};
use crate::expand::Staged;
use crate::value::FlatArg;

/// Encode `text` as ASCII; `position` is its index in the logical argument list.
pub fn encode_text(position: usize, text: &str) -> Result<Vec<u8>> {
    if let Some(character) = text.chars().find(|c| !c.is_ascii()) {
        return Err(LowlevelError::Encoding {
            position,
            text: text.to_string(),
            character,
        });
    }
    Ok(text.as_bytes().to_vec())
}

pub(crate) fn encode_strings(staged: Vec<Staged>) -> Result<Vec<Staged>> {
    staged.into_iter().map(encode_staged).collect()
}

fn encode_staged(item: Staged) -> Result<Staged> {
    Ok(match item {
        Staged::Text { position, text } => {
            Staged::Flat(FlatArg::Bytes(encode_text(position, &text)?))
        }
        Staged::Group(items) => Staged::Group(encode_strings(items)?),
        other @ (Staged::Flat(_) | Staged::Work(_)) => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_text_encodes_to_its_bytes() {
        assert_eq!(encode_text(0, "V").unwrap(), b"V".to_vec());
        assert_eq!(encode_text(3, "Upper").unwrap(), b"Upper".to_vec());
        assert_eq!(encode_text(0, "").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn non_ascii_text_is_rejected() {
        let err = encode_text(2, "Vé").unwrap_err();
        assert_eq!(
            err,
            LowlevelError::Encoding {
                position: 2,
                text: "Vé".to_string(),
                character: 'é',
            }
        );
        assert!(err.to_string().contains("argument 2"));
    }
}
