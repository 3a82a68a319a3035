//! Boundary scanning and part splitting for multipart bodies.

/// Byte offsets of every occurrence of `boundary` in `message`.
///
/// The search restarts one byte past each match, so overlapping
/// occurrences are all reported. Offsets are strictly increasing.
/// `boundary` must be non-empty; the orchestrator routes empty
/// boundaries to single-part mode before reaching here.
#[must_use]
pub(crate) fn scan(message: &str, boundary: &str) -> Vec<usize> {
    debug_assert!(!boundary.is_empty());

    let haystack = message.as_bytes();
    let needle = boundary.as_bytes();
    let mut offsets = Vec::new();
    let mut from = 0;

    while from + needle.len() <= haystack.len() {
        let Some(found) = haystack[from..]
            .windows(needle.len())
            .position(|window| window == needle)
        else {
            break;
        };
        offsets.push(from + found);
        from += found + 1;
    }

    offsets
}

/// Splits `message` into raw body-part slices between adjacent
/// boundary occurrences.
///
/// Each slice runs from the end of one occurrence to the start of the
/// next, so it keeps the delimiter's surrounding CRLF and closing `--`
/// artifacts. Fewer than two occurrences yield no parts.
#[must_use]
pub(crate) fn split<'a>(message: &'a str, boundary: &str, offsets: &[usize]) -> Vec<&'a str> {
    offsets
        .windows(2)
        .map(|pair| &message[pair[0] + boundary.len()..pair[1]])
        .collect()
}

/// Strips the boundary artifacts a raw split slice retains at its end:
/// one closing `--` marker, then one CRLF.
#[must_use]
pub(crate) fn trim_artifacts(part: &str) -> &str {
    let part = part.strip_suffix("--").unwrap_or(part);
    part.strip_suffix("\r\n").unwrap_or(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_all_occurrences() {
        let message = "\r\n--b1\r\nfirst\r\n--b1\r\nsecond\r\n--b1--";
        assert_eq!(scan(message, "b1"), vec![4, 17, 31]);
    }

    #[test]
    fn test_scan_no_occurrences() {
        assert!(scan("no delimiter here", "boundary").is_empty());
    }

    #[test]
    fn test_scan_reports_overlaps() {
        assert_eq!(scan("aaaa", "aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_scan_offsets_strictly_increase() {
        let offsets = scan("xx-xx-xx", "xx");
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_split_adjacent_pairs() {
        let message = "--b.one--b.two--b";
        let offsets = scan(message, "b");
        assert_eq!(split(message, "b", &offsets), vec![".one--", ".two--"]);
    }

    #[test]
    fn test_split_needs_two_occurrences() {
        let message = "--only one boundary--";
        let offsets = scan(message, "boundary");
        assert_eq!(offsets.len(), 1);
        assert!(split(message, "boundary", &offsets).is_empty());
    }

    #[test]
    fn test_trim_artifacts() {
        assert_eq!(trim_artifacts("body\r\n--"), "body");
        assert_eq!(trim_artifacts("body\r\n"), "body");
        assert_eq!(trim_artifacts("body"), "body");
        assert_eq!(trim_artifacts(""), "");
    }
}
