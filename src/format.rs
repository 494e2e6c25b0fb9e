//! Small display helpers for report text.

/// Joins names for display: comma-separated with an ampersand before the
/// final entry, e.g. `["a", "b", "c"]` becomes `"a, b & c"`.
///
/// A single entry is returned bare and an empty slice yields an empty
/// string, so callers can format optional collections without a length
/// check first.
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let mut out = init
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(" & ");
            out.push_str(last.as_ref());
            out
        }
    }
}
