//! Frame ID mappings from older ID3v2 revisions to ID3v2.4
//!
//! [`upgrade_v2`] and [`upgrade_v3`] only map frames whose body layout is unchanged in ID3v2.4.
//! Frames whose layout changed but still carry the same information are listed by [`bridge_target`].

/// Upgrade an ID3v2.2 key to an ID3v2.4 key
///
/// # Examples
///
/// ```rust
/// use tagcodec::id3::v2::upgrade_v2;
///
/// assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
/// assert_eq!(upgrade_v2("XYZ"), None);
/// ```
pub fn upgrade_v2(key: &str) -> Option<&'static str> {
	let upgraded = match key {
		"BUF" => "RBUF",
		"CNT" => "PCNT",
		"COM" => "COMM",
		"CRA" => "AENC",
		"ETC" => "ETCO",
		"GEO" => "GEOB",
		"IPL" => "TIPL",
		"MCI" => "MCDI",
		"MLL" => "MLLT",
		"POP" => "POPM",
		"REV" => "RVRB",
		"SLT" => "SYLT",
		"STC" => "SYTC",
		"TAL" => "TALB",
		"TBP" => "TBPM",
		"TCM" => "TCOM",
		"TCO" => "TCON",
		"TCP" => "TCMP",
		"TCR" => "TCOP",
		"TDY" => "TDLY",
		"TEN" => "TENC",
		"TFT" => "TFLT",
		"TKE" => "TKEY",
		"TLA" => "TLAN",
		"TLE" => "TLEN",
		"TMT" => "TMED",
		"TOA" | "TOT" => "TOAL",
		"TOF" => "TOFN",
		"TOL" | "TXT" => "TOLY",
		"TOR" => "TDOR",
		"TP1" => "TPE1",
		"TP2" => "TPE2",
		"TP3" => "TPE3",
		"TP4" => "TPE4",
		"TPA" => "TPOS",
		"TPB" => "TPUB",
		"TRC" => "TSRC",
		"TRD" | "TYE" => "TDRC",
		"TRK" => "TRCK",
		"TS2" => "TSO2",
		"TSA" => "TSOA",
		"TSC" => "TSOC",
		"TSP" => "TSOP",
		"TSS" => "TSSE",
		"TST" => "TSOT",
		"TT1" => "TIT1",
		"TT2" => "TIT2",
		"TT3" => "TIT3",
		"TXX" => "TXXX",
		"UFI" => "UFID",
		"ULT" => "USLT",
		"WAF" => "WOAF",
		"WAR" => "WOAR",
		"WAS" => "WOAS",
		"WCM" => "WCOM",
		"WCP" => "WCOP",
		"WPB" => "WPUB",
		"WXX" => "WXXX",
		// iTunes
		"PCS" => "PCST",
		"TCT" => "TCAT",
		"TDS" => "TDES",
		"TID" => "TGID",
		"WFD" => "WFED",
		"MVI" => "MVIN",
		"MVN" => "MVNM",
		"GP1" => "GRP1",
		"TDR" => "TDRL",
		_ => return None,
	};

	Some(upgraded)
}

/// Upgrade an ID3v2.3 key to an ID3v2.4 key
///
/// # Examples
///
/// ```rust
/// use tagcodec::id3::v2::upgrade_v3;
///
/// assert_eq!(upgrade_v3("TYER"), Some("TDRC"));
/// assert_eq!(upgrade_v3("TIT2"), None);
/// ```
pub fn upgrade_v3(key: &str) -> Option<&'static str> {
	match key {
		"TORY" => Some("TDOR"),
		"TYER" => Some("TDRC"),
		"IPLS" => Some("TIPL"),
		_ => None,
	}
}

/// The ID3v2.4 frame that a differently laid out older frame can be bridged to
///
/// The payload is carried over as-is. See [`Frame::upgrade`](crate::id3::v2::Frame::upgrade).
///
/// # Examples
///
/// ```rust
/// use tagcodec::id3::v2::bridge_target;
///
/// assert_eq!(bridge_target("RVAD"), Some("RVA2"));
/// ```
pub fn bridge_target(key: &str) -> Option<&'static str> {
	match key {
		// Relative volume adjustment
		"RVA" | "RVAD" => Some("RVA2"),
		_ => None,
	}
}
