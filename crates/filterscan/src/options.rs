/// Configuration for a [`Scanner`](crate::Scanner).
///
/// # Default
///
/// No depth limit, bare paths allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "snake_case")
)]
pub struct ScannerOptions {
    /// Maximum number of simultaneously open groups.
    ///
    /// Opening one more group than this fails with
    /// [`ErrorKind::NestingTooDeep`](crate::ErrorKind::NestingTooDeep). Hosts
    /// that recurse over the resulting expression tree use this to bound their
    /// stack depth.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub max_depth: Option<usize>,

    /// Whether an attribute path may stand alone as a predicate.
    ///
    /// A bare path is a path followed directly by the end of the filter, a
    /// closing `)`, or a logical `and`/`or`:
    ///
    /// ```text
    /// emails
    /// (a and b) or c
    /// ```
    ///
    /// It is accepted as-is, without an implied `pr`. When `false`, the scanner
    /// rejects it with
    /// [`ErrorKind::MissingOperator`](crate::ErrorKind::MissingOperator).
    ///
    /// # Default
    ///
    /// `true`
    pub allow_bare_paths: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            allow_bare_paths: true,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let options: ScannerOptions = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(
            options,
            ScannerOptions {
                max_depth: Some(4),
                allow_bare_paths: true,
            }
        );
    }
}
