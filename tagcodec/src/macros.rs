macro_rules! try_vec {
	($elem:expr; $size:expr, $limit:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size, $limit)? }};
}

// Shorthand for return Err(TagCodecError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagCodecError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagCodecError::new(ErrorKind::Variant(Message)))
// - err!(Variant { a, b })  -> return Err(TagCodecError::new(ErrorKind::Variant { a, b }))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagCodecError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::TagCodecError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
	($variant:ident { $($fields:tt)* }) => {
		return Err(crate::error::TagCodecError::new(
			crate::error::ErrorKind::$variant { $($fields)* },
		))
	};
}

// Shorthand for TagCodecError::new(ErrorKind::Corruption("Message"))
//
// Usage:
//
// - corrupt!(Message)
//
// or bail:
//
// - corrupt!(@BAIL Message)
macro_rules! corrupt {
	($reason:literal) => {
		crate::error::TagCodecError::new(crate::error::ErrorKind::Corruption($reason))
	};
	(@BAIL $reason:literal) => {
		return Err(corrupt!($reason))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: All fields are optional, if `STRICT` or `RELAXED` are missing, it will
// 		 fall through to `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		RELAXED: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {corrupt, err, parse_mode_choice, try_vec};
