//! Parsing for `name=value; name2=value2` cookie-style headers.

/// One `name=value` pair from a header.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CookiePair<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Split a header into its pairs. Pairs are separated by `;` and split on their first
/// `=`; both halves are trimmed. Pieces without `=` or with an empty name are skipped.
pub fn parse_cookies(header: &str) -> Vec<CookiePair<'_>> {
    header
        .split(';')
        .filter_map(|piece| {
            let (name, value) = piece.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                Some(CookiePair {
                    name,
                    value: value.trim(),
                })
            }
        })
        .collect()
}

/// Find the value of the first pair named `name`.
pub(super) fn find<'a>(pairs: &[CookiePair<'a>], name: &str) -> Option<&'a str> {
    pairs.iter().find(|pair| pair.name == name).map(|pair| pair.value)
}
