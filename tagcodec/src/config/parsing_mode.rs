/// The parsing strictness mode
///
/// This can be set with [`CodecOptions::parsing_mode`](crate::config::CodecOptions::parsing_mode).
///
/// # Examples
///
/// ```rust
/// use tagcodec::config::{CodecOptions, ParsingMode};
///
/// // We only want to read well-formed inputs
/// let options = CodecOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * A child chunk of an ASF header fails to parse - The entire header is discarded
	/// * A frame has an invalid ID, or a size of zero - An error is returned rather than skipping it
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// NOTE: A readable input does *not* necessarily make it writeable.
	///
	/// ## Examples of behavior
	///
	/// * A child chunk of an ASF header fails to parse - The child is kept as an opaque chunk and
	///   the parser moves on to the next child
	/// * A frame has an invalid ID, or a malformed body - The frame is skipped
	#[default]
	BestAttempt,
	/// Least eager to error, may produce invalid/partial output
	///
	/// ## Examples of behavior
	///
	/// * An ASF header declares more or fewer children than it holds - The count is silently
	///   corrected, where [`ParsingMode::BestAttempt`] would log a warning
	Relaxed,
}
