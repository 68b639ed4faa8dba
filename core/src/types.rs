//! Scalar type registry of the wire format.
//!
//! Every matrix column is tagged with one of the closed set of scalar kinds
//! below. The wire code, byte width and little-endian layout of each kind are
//! fixed; record layouts are the concatenation of the column encodings in
//! declared order, without padding.

use std::fmt;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use num_enum::TryFromPrimitive;

/// Scalar kinds understood by the matrix codec, tagged with their wire codes.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ScalarType {
    Int8    = 0x00,
    UInt8   = 0x01,
    Int16   = 0x02,
    UInt16  = 0x03,
    Int32   = 0x04,
    UInt32  = 0x05,
    Float32 = 0x06,
    Int64   = 0x07,
    Float64 = 0x08,
}

impl ScalarType {
    /// Encoded width of one value of this kind in bytes.
    pub const fn width(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::UInt8 => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => 4,
            ScalarType::Int64 | ScalarType::Float64 => 8,
        }
    }

    /// Wire code as written into matrix headers.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Int8 => "int8",
            ScalarType::UInt8 => "uint8",
            ScalarType::Int16 => "int16",
            ScalarType::UInt16 => "uint16",
            ScalarType::Int32 => "int32",
            ScalarType::UInt32 => "uint32",
            ScalarType::Float32 => "float32",
            ScalarType::Int64 => "int64",
            ScalarType::Float64 => "float64",
        };
        f.write_str(name)
    }
}

/// One decoded cell value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Int64(i64),
    Float64(f64),
}

impl Scalar {
    /// Kind tag of this value.
    pub const fn ty(self) -> ScalarType {
        match self {
            Scalar::Int8(_) => ScalarType::Int8,
            Scalar::UInt8(_) => ScalarType::UInt8,
            Scalar::Int16(_) => ScalarType::Int16,
            Scalar::UInt16(_) => ScalarType::UInt16,
            Scalar::Int32(_) => ScalarType::Int32,
            Scalar::UInt32(_) => ScalarType::UInt32,
            Scalar::Float32(_) => ScalarType::Float32,
            Scalar::Int64(_) => ScalarType::Int64,
            Scalar::Float64(_) => ScalarType::Float64,
        }
    }

    /// Canonical little-endian encoding.
    pub fn write_to<W: Write>(self, w: &mut W) -> std::io::Result<()> {
        match self {
            Scalar::Int8(v) => w.write_i8(v),
            Scalar::UInt8(v) => w.write_u8(v),
            Scalar::Int16(v) => w.write_i16::<LittleEndian>(v),
            Scalar::UInt16(v) => w.write_u16::<LittleEndian>(v),
            Scalar::Int32(v) => w.write_i32::<LittleEndian>(v),
            Scalar::UInt32(v) => w.write_u32::<LittleEndian>(v),
            Scalar::Float32(v) => w.write_f32::<LittleEndian>(v),
            Scalar::Int64(v) => w.write_i64::<LittleEndian>(v),
            Scalar::Float64(v) => w.write_f64::<LittleEndian>(v),
        }
    }

    /// Canonical little-endian decoding of one value of the given kind.
    pub fn read_from<R: Read>(r: &mut R, ty: ScalarType) -> std::io::Result<Scalar> {
        Ok(match ty {
            ScalarType::Int8 => Scalar::Int8(r.read_i8()?),
            ScalarType::UInt8 => Scalar::UInt8(r.read_u8()?),
            ScalarType::Int16 => Scalar::Int16(r.read_i16::<LittleEndian>()?),
            ScalarType::UInt16 => Scalar::UInt16(r.read_u16::<LittleEndian>()?),
            ScalarType::Int32 => Scalar::Int32(r.read_i32::<LittleEndian>()?),
            ScalarType::UInt32 => Scalar::UInt32(r.read_u32::<LittleEndian>()?),
            ScalarType::Float32 => Scalar::Float32(r.read_f32::<LittleEndian>()?),
            ScalarType::Int64 => Scalar::Int64(r.read_i64::<LittleEndian>()?),
            ScalarType::Float64 => Scalar::Float64(r.read_f64::<LittleEndian>()?),
        })
    }

    /// Integer view of the value. Float kinds are truncated.
    pub fn as_i64(self) -> i64 {
        match self {
            Scalar::Int8(v) => v as i64,
            Scalar::UInt8(v) => v as i64,
            Scalar::Int16(v) => v as i64,
            Scalar::UInt16(v) => v as i64,
            Scalar::Int32(v) => v as i64,
            Scalar::UInt32(v) => v as i64,
            Scalar::Float32(v) => v as i64,
            Scalar::Int64(v) => v,
            Scalar::Float64(v) => v as i64,
        }
    }

    /// Floating point view of the value.
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int8(v) => v as f64,
            Scalar::UInt8(v) => v as f64,
            Scalar::Int16(v) => v as f64,
            Scalar::UInt16(v) => v as f64,
            Scalar::Int32(v) => v as f64,
            Scalar::UInt32(v) => v as f64,
            Scalar::Float32(v) => v as f64,
            Scalar::Int64(v) => v as f64,
            Scalar::Float64(v) => v,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int8(v) => write!(f, "{}", v),
            Scalar::UInt8(v) => write!(f, "{}", v),
            Scalar::Int16(v) => write!(f, "{}", v),
            Scalar::UInt16(v) => write!(f, "{}", v),
            Scalar::Int32(v) => write!(f, "{}", v),
            Scalar::UInt32(v) => write!(f, "{}", v),
            Scalar::Float32(v) => write!(f, "{}", v),
            Scalar::Int64(v) => write!(f, "{}", v),
            Scalar::Float64(v) => write!(f, "{}", v),
        }
    }
}

/// Render an enum variant for a raw wire code, falling back to hex for
/// unknown codes.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}
