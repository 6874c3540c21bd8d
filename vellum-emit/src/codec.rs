//! Binary encoding of emitted programs
//!
//! Layout:
//! - MAGIC (2 bytes): `VL`
//! - VERSION (1 byte): format version
//! - BODY: postcard-encoded list of programs

use thiserror::Error;

use crate::program::EmitProgram;

/// Leading bytes of every encoded bundle
pub const PROGRAM_MAGIC: [u8; 2] = *b"VL";

/// Current encoding version
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = PROGRAM_MAGIC.len() + 1;

/// Errors that can occur while encoding or decoding programs
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input shorter than the header
    #[error("encoded program is truncated")]
    Truncated,
    /// Magic bytes did not match
    #[error("not an encoded program bundle")]
    BadMagic,
    /// Produced by a newer or older encoder
    #[error("unsupported program format version {0}")]
    UnsupportedVersion(u8),
    /// Body could not be (de)serialized
    #[error("program body: {0}")]
    Body(#[from] postcard::Error),
}

/// Encode programs into a self-describing byte buffer
pub fn encode(programs: &[EmitProgram]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(&PROGRAM_MAGIC);
    out.push(FORMAT_VERSION);
    let body = postcard::to_allocvec(programs)?;
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode programs produced by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<Vec<EmitProgram>, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated);
    }
    if bytes[..PROGRAM_MAGIC.len()] != PROGRAM_MAGIC {
        return Err(CodecError::BadMagic);
    }
    let version = bytes[PROGRAM_MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    Ok(postcard::from_bytes(&bytes[HEADER_LEN..])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lambda::{CompiledLambda, Parameter, ReturnType};
    use crate::ops::{
        ComponentRegistration, DisplayRegistration, EmitOp, Literal, Registration, TemplateArg,
        TypeRef,
    };

    fn sample_program() -> EmitProgram {
        let mut program = EmitProgram::new("display_buffer");
        program.push(EmitOp::Instantiate {
            id: "fb".into(),
            class: TypeRef::new("display_buffer::Buffer"),
            template: TemplateArg::Type(TypeRef::new("display::PixelRGB565")),
        });
        program.push(EmitOp::setter("fb", "set_width", Literal::UInt(100)));
        program.push(EmitOp::Register {
            target: "fb".into(),
            registration: Registration::Component(ComponentRegistration {
                setup_priority: Some(600.0),
                update_interval_ms: Some(5000),
            }),
        });
        program.push(EmitOp::Register {
            target: "fb".into(),
            registration: Registration::Display(DisplayRegistration::default()),
        });
        program.push(EmitOp::SetCallback {
            target: "fb".into(),
            setter: "set_writer".into(),
            lambda: CompiledLambda {
                params: vec![Parameter::new("display::DisplayBuffer &", "it")],
                return_type: ReturnType::Void,
                body: "it.fill(Color::WHITE);".into(),
            },
        });
        program
    }

    #[test]
    fn test_encode_header() {
        let encoded = encode(&[]).unwrap();
        assert_eq!(&encoded[..2], b"VL");
        assert_eq!(encoded[2], FORMAT_VERSION);
    }

    #[test]
    fn test_decode_restores_programs() {
        let programs = vec![sample_program(), EmitProgram::new("display_buffer")];
        let encoded = encode(&programs).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, programs);
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(decode(b"VL"), Err(CodecError::Truncated)));
    }

    #[test]
    fn test_decode_bad_magic() {
        let mut encoded = encode(&[sample_program()]).unwrap();
        encoded[0] ^= 0xFF;
        assert!(matches!(decode(&encoded), Err(CodecError::BadMagic)));
    }

    #[test]
    fn test_decode_version_mismatch() {
        let mut encoded = encode(&[sample_program()]).unwrap();
        encoded[2] = FORMAT_VERSION + 1;
        assert!(matches!(
            decode(&encoded),
            Err(CodecError::UnsupportedVersion(v)) if v == FORMAT_VERSION + 1
        ));
    }
}
