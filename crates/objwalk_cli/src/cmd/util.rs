use serde::Serialize;

/// Render a pointer value as fixed-width hex.
pub fn ptr_hex(ptr: u64) -> String {
	format!("0x{ptr:016x}")
}

/// Print a serializable payload as pretty JSON on stdout.
pub fn emit_json<T: Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode: {err}"),
	}
}
