use crate::{error::fileio::*, Image, TRIBIT_VER};

const TRIBITIMAGE: &str = "TRIBITIMAGE";
const IMAGEEND: &str = "IMAGEEND";

pub fn ser(image: &Image) -> FileIOResult<Vec<u8>> {
	let mut output = vec![];
	output.extend(format!("{}\n{}\n", TRIBITIMAGE, TRIBIT_VER).as_bytes()); // Image header
	let payload = bincode::serialize(image)
		.map_err(|e| FileIOError::ExternalError("bincode::Error".into(), e.to_string()))?;
	output.extend(payload);
	output.extend(format!("\n{}", IMAGEEND).as_bytes()); // Trailer
	Ok(output)
}

pub fn de(input: &[u8]) -> FileIOResult<Image> {
	let mut input = consume(input, format!("{}\n", TRIBITIMAGE).as_bytes(), MalformedHeaderError::ImageDecl)?;
	input = consume(input, format!("{}\n", TRIBIT_VER).as_bytes(), MalformedHeaderError::Version)?;

	let image: Image = bincode::deserialize_from(&mut input).map_err(|e| match *e {
		bincode::ErrorKind::Custom(msg) => FileIOError::MalformedImage(MalformedImageError::InvalidProgram(msg)),
		other => FileIOError::MalformedImage(MalformedImageError::PayloadDeser(other.to_string())),
	})?;

	let rest = consume(input, format!("\n{}", IMAGEEND).as_bytes(), MalformedHeaderError::ImageEnd)?;
	if !rest.is_empty() {
		return Err(FileIOError::MalformedImage(MalformedImageError::TrailingBytes(rest.len())));
	}
	Ok(image)
}

fn consume<'a>(input: &'a [u8], expected: &[u8], kind: MalformedHeaderError) -> FileIOResult<&'a [u8]> {
	input.strip_prefix(expected).ok_or(FileIOError::MalformedHeader(kind))
}
