//! Separator detection by statistical dispersion.
//!
//! Each candidate separator gets a histogram of per-line piece counts,
//! taken on a quote-stripped variant of the line so that separators inside
//! quoted values do not vote. A candidate scores `median − stddev`; a
//! median of one piece means the candidate never splits and is disqualified.

use crate::engine::stats::Histogram;

/// Candidate separators, in preference order for score ties.
pub const CANDIDATE_SEPARATORS: [u8; 4] = [b',', b';', b'|', b'\t'];

/// Outcome of separator detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// The winning separator.
    pub separator: u8,
    /// No candidate qualified; `,` was assumed.
    pub fallback: bool,
}

/// Pick the best separator for the sampled lines.
pub fn detect_separator<S: AsRef<str>>(lines: &[S]) -> Detection {
    let mut histograms = vec![Histogram::new(); CANDIDATE_SEPARATORS.len()];

    for line in lines {
        let stripped = strip_quoted_regions(line.as_ref());
        for (hist, &sep) in histograms.iter_mut().zip(&CANDIDATE_SEPARATORS) {
            let pieces = bytecount::count(stripped.as_bytes(), sep) as u64 + 1;
            hist.record(pieces);
        }
    }

    let mut best: Option<(f64, u8)> = None;
    for (hist, &sep) in histograms.iter().zip(&CANDIDATE_SEPARATORS) {
        let median = hist.median_tie_high();
        if median <= 1 {
            continue;
        }
        let score = median as f64 - hist.std_dev();
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, sep));
        }
    }

    match best {
        Some((_, separator)) => Detection {
            separator,
            fallback: false,
        },
        None => Detection {
            separator: b',',
            fallback: true,
        },
    }
}

/// Build the quote-stripped variant of a line.
///
/// Escaped quotes (`""` and `\"`) are removed first, then the content of
/// every fully-closed quoted region is excised. An unclosed trailing region
/// is kept as-is.
fn strip_quoted_regions(line: &str) -> String {
    let cleaned = line.replace("\\\"", "").replace("\"\"", "");

    let mut out = String::with_capacity(cleaned.len());
    let mut rest = cleaned.as_str();
    while let Some(start) = rest.find('"') {
        out.push_str(&rest[..start]);
        match rest[start + 1..].find('"') {
            Some(offset) => rest = &rest[start + 1 + offset + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
