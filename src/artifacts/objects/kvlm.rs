//! Key-value list with message
//!
//! The payload format shared by commits and tags:
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author Jane <jane@example.com> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  iQIzBAABCAAdFiEExwXquOM8bWb4Q2zVGxM2FxoLkGQFAlsEjZQACgkQGxM2FxoL
//!  -----END PGP SIGNATURE-----
//!
//! Create first draft
//! ```
//!
//! Each field is `key SP value LF`. A value spanning several lines continues on
//! lines starting with a single space, which is stripped on parse and put back on
//! serialize. The first blank line ends the fields; everything after it is the message.
//!
//! Repeated keys accumulate in order under the position of their first occurrence,
//! so a payload round-trips byte for byte as long as repeated keys are adjacent.

use crate::errors::TwigError;
use bytes::Bytes;

/// Ordered fields plus a trailing free-text message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kvlm {
    fields: Vec<(Bytes, Vec<Bytes>)>,
    message: Bytes,
}

impl Kvlm {
    /// First value stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<&Bytes> {
        self.get_all(key).first()
    }

    /// Every value stored under `key`, in order of appearance
    pub fn get_all(&self, key: &[u8]) -> &[Bytes] {
        self.fields
            .iter()
            .find(|(field_key, _)| field_key.as_ref() == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        !self.get_all(key).is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.fields.iter().map(|(key, _)| key)
    }

    /// Append a value; a key already present gains another value instead of being overwritten
    pub fn push(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();

        match self
            .fields
            .iter_mut()
            .find(|(field_key, _)| *field_key == key)
        {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key, vec![value])),
        }
    }

    pub fn message(&self) -> &Bytes {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<Bytes>) {
        self.message = message.into();
    }

    /// Parse a payload iteratively, one field per step
    pub fn parse(raw: &[u8]) -> anyhow::Result<Self> {
        let mut kvlm = Kvlm::default();
        let mut start = 0;

        loop {
            let space = find_from(raw, b' ', start);
            let newline = find_from(raw, b'\n', start);

            match (space, newline) {
                // a newline before any space must be the blank separator line
                (_, Some(nl)) if space.is_none_or(|sp| nl < sp) => {
                    if nl != start {
                        return Err(TwigError::Format(format!(
                            "field without value at byte {start}"
                        ))
                        .into());
                    }
                    kvlm.message = Bytes::copy_from_slice(&raw[start + 1..]);
                    return Ok(kvlm);
                }
                (Some(sp), _) => {
                    let key = &raw[start..sp];

                    // the value ends at the first newline not followed by a continuation space
                    let mut end = sp;
                    loop {
                        end = find_from(raw, b'\n', end + 1).ok_or_else(|| {
                            TwigError::Format(format!(
                                "unterminated value for key {}",
                                String::from_utf8_lossy(key)
                            ))
                        })?;
                        if raw.get(end + 1) != Some(&b' ') {
                            break;
                        }
                    }

                    let value = replace_all(&raw[sp + 1..end], b"\n ", b"\n");
                    kvlm.push(Bytes::copy_from_slice(key), Bytes::from(value));
                    start = end + 1;
                }
                (None, _) => {
                    return Err(
                        TwigError::Format("missing blank line before message".into()).into(),
                    );
                }
            }
        }
    }

    /// Serialize fields in order, then a blank line and the message
    pub fn serialize(&self) -> Bytes {
        let mut raw = Vec::new();

        for (key, values) in &self.fields {
            for value in values {
                raw.extend_from_slice(key);
                raw.push(b' ');
                raw.extend(replace_all(value, b"\n", b"\n "));
                raw.push(b'\n');
            }
        }

        raw.push(b'\n');
        raw.extend_from_slice(&self.message);

        Bytes::from(raw)
    }
}

fn find_from(haystack: &[u8], needle: u8, start: usize) -> Option<usize> {
    haystack
        .get(start..)?
        .iter()
        .position(|&byte| byte == needle)
        .map(|offset| start + offset)
}

fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut replaced = Vec::with_capacity(haystack.len());
    let mut rest = haystack;

    while !rest.is_empty() {
        if rest.starts_with(from) {
            replaced.extend_from_slice(to);
            rest = &rest[from.len()..];
        } else {
            replaced.push(rest[0]);
            rest = &rest[1..];
        }
    }

    replaced
}
