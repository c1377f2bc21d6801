/// Pointer and array shape parsed from a C-like member declarator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declarator<'a> {
	/// Bare member identifier.
	pub ident: &'a str,
	/// Pointer nesting depth (`*`, `**`, ...).
	pub ptr_depth: u8,
	/// Flattened inline array element count (`[2][3]` is 6).
	pub count: usize,
	/// Whether the declarator spells a function pointer.
	pub is_func_ptr: bool,
}

impl Declarator<'_> {
	/// Whether the member is reached through a pointer.
	pub fn is_indirect(&self) -> bool {
		self.ptr_depth > 0 || self.is_func_ptr
	}

	/// Whether the member is an inline array rather than a single element.
	pub fn is_array(&self) -> bool {
		self.count != 1
	}
}

/// Parse declarator text such as `*next`, `pos[3]`, `m[4][4]`, or `(*cb)()`.
pub fn parse_declarator(raw: &str) -> Declarator<'_> {
	let trimmed = raw.trim();
	let mut decl = Declarator {
		ident: trimmed,
		ptr_depth: 0,
		count: 1,
		is_func_ptr: trimmed.contains(")("),
	};

	if let Some(start) = trimmed.find("(*") {
		let after = &trimmed[start + 2..];
		if let Some(close) = after.find(')') {
			let inside = &after[..close];
			let stars = inside.chars().take_while(|c| *c == '*').count();
			decl.ptr_depth = (stars as u8).saturating_add(1);
			let ident = inside.trim_start_matches('*').trim();
			if !ident.is_empty() {
				decl.ident = ident;
			}
			return decl;
		}
	}

	let stars = trimmed.chars().take_while(|c| *c == '*').count();
	decl.ptr_depth = stars as u8;
	let mut tail = &trimmed[stars..];

	let ident_end = tail.find('[').unwrap_or(tail.len());
	let ident = tail[..ident_end].trim();
	if !ident.is_empty() {
		decl.ident = ident;
	}

	tail = &tail[ident_end..];
	if !decl.is_func_ptr {
		let mut total = 1_usize;
		while let Some(start) = tail.find('[') {
			let Some(end) = tail[start + 1..].find(']') else {
				break;
			};
			let end = start + 1 + end;
			let dim = tail[start + 1..end].trim().parse::<usize>().unwrap_or(1);
			total = total.saturating_mul(dim);
			tail = &tail[end + 1..];
		}
		decl.count = total;
	}

	decl
}

/// Parse declarator text strictly, rejecting anything [`parse_declarator`] would guess at.
///
/// Accepts `ident`, `*ident`, `ident[N]...`, and `(*ident)(...)`, where
/// identifiers are ASCII alphanumerics or `_` and every dimension is a decimal
/// count.
pub fn check_declarator(raw: &str) -> Option<Declarator<'_>> {
	let decl = parse_declarator(raw);
	if !is_ident(decl.ident) {
		return None;
	}

	let trimmed = raw.trim();
	if decl.is_func_ptr {
		return trimmed.starts_with("(*").then_some(decl);
	}

	let mut tail = trimmed.trim_start_matches('*').strip_prefix(decl.ident)?;
	while !tail.is_empty() {
		let inner = tail.strip_prefix('[')?;
		let close = inner.find(']')?;
		let dim = inner[..close].trim();
		if dim.is_empty() || !dim.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		tail = &inner[close + 1..];
	}

	Some(decl)
}

fn is_ident(text: &str) -> bool {
	!text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Split an array type name such as `Vec3[4]` into element type and count.
pub fn split_array_type(type_name: &str) -> Option<(&str, usize)> {
	let open = type_name.find('[')?;
	let elem = type_name[..open].trim();
	if elem.is_empty() || !type_name.ends_with(']') {
		return None;
	}

	let mut count = 1_usize;
	let mut tail = &type_name[open..];
	while !tail.is_empty() {
		let inner = tail.strip_prefix('[')?;
		let close = inner.find(']')?;
		let dim = inner[..close].trim().parse::<usize>().ok()?;
		count = count.checked_mul(dim)?;
		tail = &inner[close + 1..];
	}

	Some((elem, count))
}

/// Render the array type name used for inline arrays of complex members.
pub fn array_type_name(elem: &str, count: usize) -> String {
	format!("{elem}[{count}]")
}
