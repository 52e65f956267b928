//! Test identity and session-label derivation.

/// Label used when a test carries no title information at all.
pub const UNKNOWN_TEST: &str = "Unknown Test";

/// Separator between title segments in a session label.
pub const LABEL_SEPARATOR: &str = " › ";

/// Hierarchical identity of one test: the runner's title path with the
/// file segment first and the innermost test title last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
	titles: Vec<String>,
}

impl TestIdentity {
	/// Builds an identity from a title path.
	pub fn new<I, S>(title_path: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			titles: title_path.into_iter().map(Into::into).collect(),
		}
	}

	/// Session display name: the title path without its file segment,
	/// joined by `›`.
	///
	/// The label is a pure function of the titles, so a test keeps the
	/// same label across repeated runs. A single-segment path keeps that
	/// segment (a test declared outside any suite); an empty path yields
	/// [`UNKNOWN_TEST`].
	pub fn label(&self) -> String {
		match self.titles.as_slice() {
			[] => UNKNOWN_TEST.to_string(),
			[only] => only.clone(),
			[_, rest @ ..] => rest.join(LABEL_SEPARATOR),
		}
	}

	/// Full title path, file segment included.
	pub fn titles(&self) -> &[String] {
		&self.titles
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_drops_the_file_segment() {
		let identity = TestIdentity::new(["checkout.spec.ts", "Checkout", "pays with saved card"]);
		assert_eq!(identity.label(), "Checkout › pays with saved card");
	}

	#[test]
	fn label_joins_deep_suites_in_order() {
		let identity = TestIdentity::new(["a.spec.ts", "Cart", "Quantities", "rejects zero"]);
		assert_eq!(identity.label(), "Cart › Quantities › rejects zero");
	}

	#[test]
	fn two_segment_path_keeps_only_the_test_title() {
		let identity = TestIdentity::new(["login.spec.ts", "logs in"]);
		assert_eq!(identity.label(), "logs in");
	}

	#[test]
	fn single_segment_path_keeps_that_segment() {
		let identity = TestIdentity::new(["sanity test"]);
		assert_eq!(identity.label(), "sanity test");
	}

	#[test]
	fn empty_path_falls_back_to_unknown() {
		let identity = TestIdentity::new(Vec::<String>::new());
		assert_eq!(identity.label(), UNKNOWN_TEST);
	}

	#[test]
	fn label_is_stable_across_calls() {
		let identity = TestIdentity::new(["file.spec", "Login", "valid credentials"]);
		assert_eq!(identity.label(), identity.label());
		assert_eq!(identity.label(), "Login › valid credentials");
	}
}
